//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`tracing_layer`]: request/response tracing with `TraceLayer`.
//! - [`metrics`]: Prometheus request metrics.
//! - [`panic`]: converts handler panics into the standard 500 body.

pub mod metrics;
pub mod panic;
pub mod tracing_layer;
