//! # darktrader-api: Axum Service for the Darktrader Site
//!
//! Accepts course registrations, contact messages and mentorship
//! applications, validates each against its schema and keeps accepted
//! records in memory for the operator to list.
//!
//! ## API Surface
//!
//! | Prefix | Module | Domain |
//! |--------|--------|--------|
//! | `/api/register`, `/api/registrations/*` | [`routes::registrations`] | Registrations |
//! | `/api/contact`, `/api/contacts/*` | [`routes::contacts`] | Contact messages |
//! | `/api/mentorship`, `/api/mentorship-applications/*` | [`routes::mentorship`] | Mentorship applications |
//! | `/health/*`, `/metrics`, `/openapi.json` | this module, [`openapi`] | Operations |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CatchPanic → TraceLayer → MetricsMiddleware → BodyLimit → Handler
//! ```
//!
//! The metrics middleware and `/metrics` are only mounted when
//! [`AppConfig::metrics_enabled`](config::AppConfig::metrics_enabled) is set.

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::header;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use darktrader_core::SubmissionKind;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_enabled = state.config.metrics_enabled;

    let mut router = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::registrations::router())
        .merge(routes::contacts::router())
        .merge(routes::mentorship::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes));

    if metrics_enabled {
        router = router
            .route("/metrics", get(prometheus_metrics))
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(state.metrics.clone()));
    }

    router
        .layer(middleware::tracing_layer::layer())
        .layer(middleware::panic::layer())
        .with_state(state)
}

/// Liveness probe: 200 whenever the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the stores answer reads.
async fn readiness(State(state): State<AppState>) -> &'static str {
    let stored: usize = SubmissionKind::ALL.iter().map(|&kind| state.count(kind)).sum();
    tracing::debug!(stored, "readiness check");
    "ready"
}

/// GET /metrics: Prometheus text exposition.
async fn prometheus_metrics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    for kind in SubmissionKind::ALL {
        state.metrics.set_stored_records(kind, state.count(kind));
    }
    let body = state
        .metrics
        .gather_and_encode()
        .map_err(AppError::Internal)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
