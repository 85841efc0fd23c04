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
    /// Number of products in the loaded catalog.
    pub catalog_size: usize,
    /// Whether a model API key is configured.
    pub gemini_configured: bool,
}

/// GET /health -- returns service status and configuration readiness.
///
/// Reports `degraded` when no model API key is configured: the catalog
/// still works but analysis requests will fail.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gemini_configured = state.config.gemini.api_key.is_some();

    let status = if gemini_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        catalog_size: state.catalog.len(),
        gemini_configured,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
