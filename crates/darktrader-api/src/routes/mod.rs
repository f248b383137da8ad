//! # Route Modules
//!
//! One module per submission kind. Each exposes a `router()` returning a
//! `Router<AppState>` that `app()` merges.

pub mod contacts;
pub mod mentorship;
pub mod registrations;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use darktrader_core::{Submission, SubmissionId};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::extract_submission;
use crate::middleware::metrics::ApiMetrics;
use crate::state::SubmissionStore;

/// Validate a submission body and persist it in `store`.
///
/// Nothing is stored unless validation passes.
pub(crate) fn accept<S: Submission>(
    store: &SubmissionStore<S>,
    metrics: &ApiMetrics,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<S::Record, AppError> {
    let form: S = extract_submission(body)?;
    let record = store.create(form);
    metrics.record_submission(S::KIND);
    Ok(record)
}

/// Look up a record by id, mapping a miss to [`AppError::NotFound`].
pub(crate) fn find<S: Submission>(
    store: &SubmissionStore<S>,
    id: SubmissionId,
) -> Result<S::Record, AppError> {
    store
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", S::KIND)))
}
