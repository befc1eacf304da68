//! Web application router and middleware setup.

use crate::hub::BroadcastHub;
use crate::web::config::WebConfig;
use crate::web::handlers;
use crate::web::websocket;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

/// The full application: the router behind trailing-slash normalization.
///
/// Normalization has to wrap the router rather than be layered onto it,
/// because route matching happens before router layers run.
pub type HubApp = NormalizePath<Router>;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub hub: Arc<BroadcastHub>,
    pub max_connections: usize,
}

/// Create the main axum application with all routes and middleware.
pub fn create_app(config: &WebConfig, hub: Arc<BroadcastHub>) -> HubApp {
    let state = AppState {
        hub,
        max_connections: config.max_websocket_connections,
    };

    let mut app = Router::new()
        // Control routes
        .route("/reset-all", post(handlers::reset_all))
        .route("/led/:rgb/:intensity", post(handlers::set_color_and_intensity))
        .route("/led/:rgb", post(handlers::set_color))
        // Health and inspection
        .route("/ping", get(handlers::ping))
        .route("/api/health", get(handlers::health_check))
        .route("/api/state", get(handlers::get_state))
        // WebSocket route; upgrades on any other path land in the fallback
        .route("/ws", get(websocket::websocket_handler))
        .fallback(websocket::fallback_handler)
        .with_state(state);

    // Add middleware layers
    let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    NormalizePathLayer::trim_trailing_slash().layer(app.layer(service_builder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LedState;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn make_app() -> (HubApp, Arc<BroadcastHub>) {
        let hub = Arc::new(BroadcastHub::default());
        (create_app(&WebConfig::default(), Arc::clone(&hub)), hub)
    }

    async fn call(app: HubApp, method: Method, uri: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ping_returns_pong() {
        let (app, _) = make_app();
        let (status, body) = call(app, Method::GET, "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "pong");
    }

    #[tokio::test]
    async fn test_led_with_intensity_broadcasts() {
        let (app, hub) = make_app();
        let (_, mut rx) = hub.join().await.unwrap();
        rx.recv().await.unwrap();

        let (status, body) = call(app, Method::POST, "/led/255,0,0/50").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Color 255,0,0 (intensity 50%) sent to all clients.");
        assert_eq!(
            rx.recv().await.as_deref(),
            Some(r#"{"color":"255,0,0","intensity":"50"}"#)
        );
    }

    #[tokio::test]
    async fn test_led_without_intensity_defaults_to_100() {
        let (app, hub) = make_app();
        let (_, mut rx) = hub.join().await.unwrap();
        rx.recv().await.unwrap();

        let (status, body) = call(app, Method::POST, "/led/0,255,0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Color 0,255,0 (intensity 100%) sent to all clients.");
        assert_eq!(
            rx.recv().await.as_deref(),
            Some(r#"{"color":"0,255,0","intensity":"100"}"#)
        );
        assert_eq!(hub.store().get().await, LedState::new("0,255,0", "100"));
    }

    #[tokio::test]
    async fn test_reset_all_broadcasts_reset() {
        let (app, hub) = make_app();
        let (_, mut rx) = hub.join().await.unwrap();
        rx.recv().await.unwrap();

        let (status, body) = call(app, Method::POST, "/reset-all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Reset command sent.");
        assert_eq!(rx.recv().await.as_deref(), Some(r#"{"reset":true}"#));
        assert_eq!(hub.store().get().await, LedState::default());
    }

    #[tokio::test]
    async fn test_trailing_slash_reaches_single_color_route() {
        let (app, hub) = make_app();
        let (_, mut rx) = hub.join().await.unwrap();
        rx.recv().await.unwrap();

        let (status, body) = call(app, Method::POST, "/led/0,255,0/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Color 0,255,0 (intensity 100%) sent to all clients.");
        assert_eq!(
            rx.recv().await.as_deref(),
            Some(r#"{"color":"0,255,0","intensity":"100"}"#)
        );
    }

    #[tokio::test]
    async fn test_plain_request_to_root_is_not_found() {
        let (app, _) = make_app();
        let (status, _) = call(app, Method::GET, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_control_routes_reject_get() {
        let (app, _) = make_app();
        let (status, _) = call(app, Method::GET, "/reset-all").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_and_state_endpoints() {
        let (app, _) = make_app();
        let (status, body) = call(app.clone(), Method::GET, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["connections"], 0);
        assert_eq!(parsed["state"]["color"], "255,0,0");

        let (status, body) = call(app, Method::GET, "/api/state").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"color":"255,0,0","intensity":"100"}"#);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let (app, _) = make_app();
        let (status, _) = call(app, Method::GET, "/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
