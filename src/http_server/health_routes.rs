//! Health HTTP Routes

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::explain_routes::ExplainState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Sink in use: file, sheets, disabled or unavailable
    pub sink: String,
    pub model: String,
}

/// Health check route
pub fn health_routes(state: Arc<ExplainState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<ExplainState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sink: state.workflow.sink().describe(),
        model: state.workflow.model().to_string(),
    })
}
