//! # OpenAPI Document
//!
//! Assembles the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Darktrader API",
        version = "0.1.0",
        description = "Registration, contact and mentorship-application intake for the Darktrader trading-education site.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::registrations::submit_registration,
        crate::routes::registrations::list_registrations,
        crate::routes::registrations::get_registration,
        crate::routes::contacts::submit_contact,
        crate::routes::contacts::list_contacts,
        crate::routes::contacts::get_contact,
        crate::routes::mentorship::submit_application,
        crate::routes::mentorship::list_applications,
        crate::routes::mentorship::get_application,
    ),
    components(schemas(
        // Records
        darktrader_core::Registration,
        darktrader_core::ContactMessage,
        darktrader_core::MentorshipApplication,
        // Inputs
        darktrader_core::RegistrationForm,
        darktrader_core::ContactForm,
        darktrader_core::MentorshipApplicationForm,
        darktrader_core::PlanFormat,
        darktrader_core::SubmissionId,
        // Errors
        darktrader_core::FieldIssue,
        darktrader_core::IssueKind,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "registrations", description = "Course registrations"),
        (name = "contacts", description = "Contact-page messages"),
        (name = "mentorship", description = "Mentorship applications"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
