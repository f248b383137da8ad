//! # Contact Messages
//!
//! Messages sent from the site's contact page.
//!
//! ## Endpoints
//!
//! - `POST /api/contact`: submit a message
//! - `GET /api/contact`, `GET /api/contacts`: list messages (aliases)
//! - `GET /api/contacts/{id}`: get one message

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use darktrader_core::{ContactForm, ContactMessage, SubmissionId};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::extract_id;
use crate::routes::{accept, find};
use crate::state::AppState;

/// Build the contacts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", get(list_contacts).post(submit_contact))
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts/{id}", get(get_contact))
}

/// POST /api/contact: submit a contact message.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactForm,
    responses(
        (status = 200, description = "Message stored", body = ContactMessage),
        (status = 400, description = "Validation error or malformed JSON", body = crate::error::ErrorBody),
        (status = 500, description = "Internal error", body = crate::error::ErrorBody),
    ),
    tag = "contacts"
)]
pub(crate) async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactMessage>, AppError> {
    let record = accept::<ContactForm>(&state.contacts, &state.metrics, body)?;
    tracing::info!(kind = "contact_message", id = %record.id, "submission accepted");
    Ok(Json(record))
}

/// GET /api/contacts: list contact messages in submission order.
///
/// Also mounted at `/api/contact`.
#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "All contact messages", body = [ContactMessage]),
    ),
    tag = "contacts"
)]
pub(crate) async fn list_contacts(State(state): State<AppState>) -> Json<Vec<ContactMessage>> {
    Json(state.contacts.list())
}

/// GET /api/contacts/{id}: get a contact message by id.
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = SubmissionId, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Message found", body = ContactMessage),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::error::ErrorBody),
    ),
    tag = "contacts"
)]
pub(crate) async fn get_contact(
    State(state): State<AppState>,
    id: Result<Path<SubmissionId>, PathRejection>,
) -> Result<Json<ContactMessage>, AppError> {
    let id = extract_id(id)?;
    find(&state.contacts, id).map(Json)
}
