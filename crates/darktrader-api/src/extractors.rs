//! # Request Extraction & Validation
//!
//! Helpers that turn axum extractor results into validated domain values,
//! mapping every failure onto [`AppError`].
//!
//! Submission bodies are extracted as untyped JSON first so that a payload
//! with a missing or mistyped field reaches the schema validator and is
//! reported field by field, rather than failing inside serde.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use darktrader_core::{Submission, SubmissionId};
use serde_json::Value;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it as submission kind `S`.
///
/// Handlers should use:
/// ```ignore
/// async fn handler(body: Result<Json<Value>, JsonRejection>) -> Result<..., AppError> {
///     let form: ContactForm = extract_submission(body)?;
///     // form has passed its schema
/// }
/// ```
pub fn extract_submission<S: Submission>(
    result: Result<Json<Value>, JsonRejection>,
) -> Result<S, AppError> {
    let payload = extract_json(result)?;
    S::validate(&payload).map_err(|err| {
        tracing::debug!(kind = %S::KIND, error = %err, "submission rejected");
        AppError::Validation(err)
    })
}

/// Extract a submission id path segment, mapping a malformed id to
/// [`AppError::BadRequest`].
pub fn extract_id(
    result: Result<Path<SubmissionId>, PathRejection>,
) -> Result<SubmissionId, AppError> {
    result
        .map(|Path(id)| id)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
