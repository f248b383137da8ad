//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps validator failures and request problems to HTTP status codes with
//! JSON bodies. Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use darktrader_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Generic message returned for every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Structured JSON error response body.
///
/// All error responses use this format. The `details` field carries the
/// per-field issues of a validation failure and is omitted otherwise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The 500 body, shared by handler errors and caught panics.
    pub fn internal() -> Self {
        Self {
            error: ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                details: None,
            },
        }
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload failed its submission schema (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = match self {
            Self::Validation(err) => {
                let message = err.to_string();
                let details = serde_json::json!({ "issues": err.issues() });
                ErrorBody {
                    error: ErrorDetail {
                        code: code.to_string(),
                        message,
                        details: Some(details),
                    },
                }
            }
            Self::Internal(ref reason) => {
                tracing::error!(error = %reason, "internal server error");
                ErrorBody::internal()
            }
            other => ErrorBody {
                error: ErrorDetail {
                    code: code.to_string(),
                    message: other.to_string(),
                    details: None,
                },
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darktrader_core::{FieldIssue, IssueKind};

    fn email_error() -> ValidationError {
        ValidationError::from_issues(vec![FieldIssue::new(
            "email",
            IssueKind::InvalidEmail,
            "Invalid email",
        )])
        .unwrap()
    }

    #[test]
    fn validation_status_code() {
        let (status, code) = AppError::from(email_error()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn bad_request_status_code() {
        let (status, code) = AppError::BadRequest("malformed JSON".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn not_found_status_code() {
        let (status, code) = AppError::NotFound("registration x".into()).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn internal_status_code() {
        let (status, code) = AppError::Internal("boom".into()).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }

    #[test]
    fn validation_display_is_the_validator_message() {
        let err = AppError::from(email_error());
        assert_eq!(err.to_string(), "Validation error: Invalid email at \"email\"");
    }

    #[test]
    fn error_body_skips_absent_details() {
        let json = serde_json::to_string(&ErrorBody::internal()).unwrap();
        assert!(json.contains("INTERNAL_ERROR"));
        assert!(!json.contains("details"));
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    /// Helper to extract status and body from a Response.
    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_validation_lists_issues() {
        let (status, body) = response_parts(AppError::from(email_error())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert!(body.error.message.contains("email"));
        let issues = &body.error.details.unwrap()["issues"];
        assert_eq!(issues[0]["path"], "email");
        assert_eq!(issues[0]["kind"], "invalid_email");
    }

    #[tokio::test]
    async fn into_response_not_found() {
        let (status, body) = response_parts(AppError::NotFound("contact 123".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.error.message.contains("contact 123"));
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("lock state corrupted".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(
            !body.error.message.contains("lock state"),
            "internal error details must not leak: {}",
            body.error.message
        );
        assert_eq!(body.error.message, INTERNAL_ERROR_MESSAGE);
    }
}
