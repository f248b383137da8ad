//! # Mentorship Applications
//!
//! Applications for the 1-on-1 mentorship programme.
//!
//! ## Endpoints
//!
//! - `POST /api/mentorship`: submit an application
//! - `GET /api/mentorship-applications`: list applications
//! - `GET /api/mentorship-applications/{id}`: get one application

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use darktrader_core::{MentorshipApplication, MentorshipApplicationForm, SubmissionId};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::extract_id;
use crate::routes::{accept, find};
use crate::state::AppState;

/// Build the mentorship router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/mentorship", post(submit_application))
        .route("/api/mentorship-applications", get(list_applications))
        .route("/api/mentorship-applications/{id}", get(get_application))
}

/// POST /api/mentorship: submit a mentorship application.
#[utoipa::path(
    post,
    path = "/api/mentorship",
    request_body = MentorshipApplicationForm,
    responses(
        (status = 200, description = "Application stored", body = MentorshipApplication),
        (status = 400, description = "Validation error or malformed JSON", body = crate::error::ErrorBody),
        (status = 500, description = "Internal error", body = crate::error::ErrorBody),
    ),
    tag = "mentorship"
)]
pub(crate) async fn submit_application(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MentorshipApplication>, AppError> {
    let record = accept::<MentorshipApplicationForm>(
        &state.mentorship_applications,
        &state.metrics,
        body,
    )?;
    tracing::info!(
        kind = "mentorship_application",
        id = %record.id,
        "submission accepted"
    );
    Ok(Json(record))
}

/// GET /api/mentorship-applications: list applications in submission order.
#[utoipa::path(
    get,
    path = "/api/mentorship-applications",
    responses(
        (status = 200, description = "All applications", body = [MentorshipApplication]),
    ),
    tag = "mentorship"
)]
pub(crate) async fn list_applications(
    State(state): State<AppState>,
) -> Json<Vec<MentorshipApplication>> {
    Json(state.mentorship_applications.list())
}

/// GET /api/mentorship-applications/{id}: get an application by id.
#[utoipa::path(
    get,
    path = "/api/mentorship-applications/{id}",
    params(("id" = SubmissionId, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application found", body = MentorshipApplication),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::error::ErrorBody),
    ),
    tag = "mentorship"
)]
pub(crate) async fn get_application(
    State(state): State<AppState>,
    id: Result<Path<SubmissionId>, PathRejection>,
) -> Result<Json<MentorshipApplication>, AppError> {
    let id = extract_id(id)?;
    find(&state.mentorship_applications, id).map(Json)
}
