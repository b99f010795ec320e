//! Location API Service Library
//!
//! HTTP front end for raster stack point queries. The binary in `main.rs`
//! wires up tracing, metrics and the listener; everything reachable from
//! [`app`] is shared with the integration tests.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod paths;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the router with every endpoint and middleware layer.
///
/// `prometheus` is `None` when no recorder is installed (tests); `/metrics`
/// then answers 503.
pub fn app(state: Arc<AppState>, prometheus: Option<PrometheusHandle>) -> Router {
    Router::new()
        // Queries
        .route("/location", get(handlers::location::location_handler))
        .route("/interval", get(handlers::interval::interval_handler))
        // Configured stacks
        .route("/stacks", get(handlers::stacks::list_stacks_handler))
        .route("/stacks/:name", get(handlers::stacks::get_stack_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
