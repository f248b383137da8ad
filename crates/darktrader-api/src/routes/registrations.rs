//! # Registrations
//!
//! Course sign-ups for one of the published plans.
//!
//! ## Endpoints
//!
//! - `POST /api/register`: submit a registration
//! - `GET /api/registrations`: list registrations
//! - `GET /api/registrations/{id}`: get one registration

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use darktrader_core::{Registration, RegistrationForm, SubmissionId};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::extract_id;
use crate::routes::{accept, find};
use crate::state::AppState;

/// Build the registrations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(submit_registration))
        .route("/api/registrations", get(list_registrations))
        .route("/api/registrations/{id}", get(get_registration))
}

/// POST /api/register: submit a course registration.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegistrationForm,
    responses(
        (status = 200, description = "Registration stored", body = Registration),
        (status = 400, description = "Validation error or malformed JSON", body = crate::error::ErrorBody),
        (status = 500, description = "Internal error", body = crate::error::ErrorBody),
    ),
    tag = "registrations"
)]
pub(crate) async fn submit_registration(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Registration>, AppError> {
    let record = accept::<RegistrationForm>(&state.registrations, &state.metrics, body)?;
    tracing::info!(
        kind = "registration",
        id = %record.id,
        format = %record.format,
        "submission accepted"
    );
    Ok(Json(record))
}

/// GET /api/registrations: list registrations in submission order.
#[utoipa::path(
    get,
    path = "/api/registrations",
    responses(
        (status = 200, description = "All registrations", body = [Registration]),
    ),
    tag = "registrations"
)]
pub(crate) async fn list_registrations(State(state): State<AppState>) -> Json<Vec<Registration>> {
    Json(state.registrations.list())
}

/// GET /api/registrations/{id}: get a registration by id.
#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    params(("id" = SubmissionId, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration found", body = Registration),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::error::ErrorBody),
    ),
    tag = "registrations"
)]
pub(crate) async fn get_registration(
    State(state): State<AppState>,
    id: Result<Path<SubmissionId>, PathRejection>,
) -> Result<Json<Registration>, AppError> {
    let id = extract_id(id)?;
    find(&state.registrations, id).map(Json)
}
