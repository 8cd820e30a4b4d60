use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "runner-prices",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Returns 200 OK once runner prices have been loaded, 503 before that or after a failure
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let load_state = state.service.state().await;

    let status = if load_state.is_loaded() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(json!({
        "status": if load_state.is_loaded() { "ready" } else { "not_ready" },
        "service": "runner-prices",
        "table": load_state,
    })))
}
