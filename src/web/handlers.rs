//! HTTP handlers for the control and health endpoints.

use crate::state::LedState;
use crate::web::router::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::json;

/// `POST /reset-all`
pub async fn reset_all(State(state): State<AppState>) -> &'static str {
    state.hub.trigger_reset_all().await;
    "Reset command sent."
}

/// `POST /led/:rgb/:intensity`
pub async fn set_color_and_intensity(
    State(state): State<AppState>,
    Path((rgb, intensity)): Path<(String, String)>,
) -> String {
    state.hub.set_color_and_intensity(&rgb, &intensity).await;
    color_sent(&rgb, &intensity)
}

/// `POST /led/:rgb`
pub async fn set_color(State(state): State<AppState>, Path(rgb): Path<String>) -> String {
    state.hub.set_color_default_intensity(&rgb).await;
    color_sent(&rgb, crate::state::DEFAULT_INTENSITY)
}

fn color_sent(rgb: &str, intensity: &str) -> String {
    format!("Color {} (intensity {}%) sent to all clients.", rgb, intensity)
}

/// `GET /ping`
pub async fn ping() -> &'static str {
    "pong"
}

/// `GET /api/state`
pub async fn get_state(State(state): State<AppState>) -> Json<LedState> {
    Json(state.hub.store().get().await)
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "led-hub",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "connections": state.hub.connection_count().await,
        "state": state.hub.store().get().await,
    }))
}
