//! # Prometheus Metrics
//!
//! Request and submission metrics backed by a `prometheus` registry owned by
//! each [`ApiMetrics`] value, so separate apps (and tests) never share
//! counters.
//!
//! HTTP-level metrics are recorded in middleware (push model). The
//! stored-record gauge is refreshed from `AppState` on each `/metrics`
//! scrape (pull model), see the handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use darktrader_core::SubmissionKind;
use prometheus::{
    core::Collector, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,
    submissions_total: IntCounterVec,
    stored_records: IntGaugeVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("darktrader_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "darktrader_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new(
                "darktrader_http_errors_total",
                "Total HTTP errors (4xx and 5xx)",
            ),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let submissions_total = IntCounterVec::new(
            Opts::new(
                "darktrader_submissions_total",
                "Accepted submissions by kind",
            ),
            &["kind"],
        )
        .expect("metric can be created");

        let stored_records = IntGaugeVec::new(
            Opts::new(
                "darktrader_stored_records",
                "Records currently held in memory by kind",
            ),
            &["kind"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(submissions_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(stored_records.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                submissions_total,
                stored_records,
            }),
        }
    }

    /// Return current total request count (sum across all labels).
    pub fn requests(&self) -> u64 {
        sum_counter(&self.inner.http_requests_total)
    }

    /// Return current total error count (sum across all labels).
    pub fn errors(&self) -> u64 {
        sum_counter(&self.inner.http_errors_total)
    }

    /// Return the number of accepted submissions of `kind`.
    pub fn submissions(&self, kind: SubmissionKind) -> u64 {
        self.inner
            .submissions_total
            .with_label_values(&[kind.as_str()])
            .get()
    }

    /// Count one accepted submission.
    pub fn record_submission(&self, kind: SubmissionKind) {
        self.inner
            .submissions_total
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    /// Set the stored-record gauge for `kind`.
    pub fn set_stored_records(&self, kind: SubmissionKind, count: usize) {
        self.inner
            .stored_records
            .with_label_values(&[kind.as_str()])
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counter(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// `path` label for requests that matched no route.
pub const UNMATCHED_PATH_LABEL: &str = "unmatched";

/// The `path` label for a request: its route template, never the raw URI.
///
/// Keeps label cardinality bounded by the number of routes.
fn path_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH_LABEL.to_string())
}

/// Middleware that records HTTP request metrics via Prometheus.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = path_label(request.extensions().get::<MatchedPath>());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_metrics_new_starts_at_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
        assert_eq!(m.submissions(SubmissionKind::Registration), 0);
    }

    #[test]
    fn requests_and_errors_are_counted_separately() {
        let m = ApiMetrics::new();
        m.record_request("POST", "/api/register", 200, 0.01);
        m.record_request("POST", "/api/register", 400, 0.01);
        m.record_request("GET", "/api/contacts", 500, 0.02);
        assert_eq!(m.requests(), 3);
        assert_eq!(m.errors(), 2);
    }

    #[test]
    fn submissions_are_counted_by_kind() {
        let m = ApiMetrics::new();
        m.record_submission(SubmissionKind::ContactMessage);
        m.record_submission(SubmissionKind::ContactMessage);
        m.record_submission(SubmissionKind::Registration);
        assert_eq!(m.submissions(SubmissionKind::ContactMessage), 2);
        assert_eq!(m.submissions(SubmissionKind::Registration), 1);
        assert_eq!(m.submissions(SubmissionKind::MentorshipApplication), 0);
    }

    #[test]
    fn separate_instances_do_not_share_counters() {
        let a = ApiMetrics::new();
        let b = ApiMetrics::new();
        a.record_submission(SubmissionKind::Registration);
        assert_eq!(b.submissions(SubmissionKind::Registration), 0);
    }

    #[test]
    fn encoded_output_names_metrics() {
        let m = ApiMetrics::new();
        m.record_request("GET", "/api/registrations", 200, 0.003);
        m.set_stored_records(SubmissionKind::Registration, 4);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("darktrader_http_requests_total"));
        assert!(text.contains("darktrader_stored_records{kind=\"registration\"} 4"));
    }

    #[test]
    fn missing_route_uses_fixed_label() {
        assert_eq!(path_label(None), UNMATCHED_PATH_LABEL);
    }
}
