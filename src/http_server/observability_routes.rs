//! Observability HTTP Routes
//!
//! Health check and query counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::observability::{MetricsRegistry, MetricsSnapshot};
use crate::store::StoreGate;

/// State for health and metrics
pub struct ObservabilityState {
    pub gate: Arc<StoreGate>,
    pub metrics: Arc<MetricsRegistry>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" once the dataset is loaded, "loading" before
    pub status: String,
    pub version: String,
    pub records: usize,
}

/// Create observability routes (nested under `/observability`)
pub fn observability_routes(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check route (also available at root /health)
pub fn health_routes(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Health is always 200; `status` tells loading from ready
async fn health_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let (status, records) = match state.gate.get() {
        Ok(store) => ("ok", store.len()),
        Err(_) => ("loading", 0),
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records,
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(
    State(state): State<Arc<ObservabilityState>>,
) -> (StatusCode, Json<MetricsSnapshot>) {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}
