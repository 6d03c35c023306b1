use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, registered sources and the active scoring backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobscout-api",
        "sources": state.aggregator.source_names(),
        "scoring": state.relevance.scoring_backend().unwrap_or("fallback-only"),
        "fallback_cap": state.config.fallback_cap,
    }))
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to JobScout API. POST criteria to /api/jobs/search."
    }))
}
