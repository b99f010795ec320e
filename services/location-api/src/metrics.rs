//! Query metrics recorded through the `metrics` facade.
//!
//! Rendered by the Prometheus exporter installed in `main.rs`; without an
//! installed recorder every call is a no-op.

use std::time::Duration;

use metrics::{counter, histogram};

pub const QUERIES_TOTAL: &str = "location_queries_total";
pub const QUERY_FAILURES_TOTAL: &str = "location_query_failures_total";
pub const QUERY_DURATION_SECONDS: &str = "location_query_duration_seconds";

/// Record one finished location query. `failure` is the error kind, if any.
pub fn record_query(elapsed: Duration, failure: Option<&'static str>) {
    counter!(QUERIES_TOTAL).increment(1);
    histogram!(QUERY_DURATION_SECONDS).record(elapsed.as_secs_f64());

    if let Some(kind) = failure {
        counter!(QUERY_FAILURES_TOTAL, "kind" => kind).increment(1);
    }
}
