use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether Graph API credentials were loaded at startup.
    pub graph_configured: bool,
}

/// GET /health -- returns service health and configuration state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let graph_configured = state.publisher.is_some();

    Json(HealthResponse {
        status: if graph_configured { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        graph_configured,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
