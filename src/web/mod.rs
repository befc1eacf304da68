//! HTTP control routes and the WebSocket realtime channel.
//!
//! The control routes push colors and reset commands to every connected
//! device; the WebSocket channel keeps clients in sync with the shared state.

pub mod config;
pub mod handlers;
pub mod router;
pub mod websocket;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::{create_app, AppState, HubApp};

use crate::error::{HubError, Result};
use crate::hub::BroadcastHub;
use axum::extract::Request;
use axum::ServiceExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Start the web server with the provided configuration.
pub async fn start_web_server(config: WebConfig) -> Result<()> {
    let hub = Arc::new(BroadcastHub::new(config.initial_state.clone()));
    let app = create_app(&config, hub);

    // Parse the bind address
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| HubError::config_error(format!("Invalid bind address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("LED hub running at http://{}", addr);
    info!("WebSocket endpoint: ws://{}/ (any path upgrades)", addr);
    info!("Control endpoints: POST /reset-all, POST /led/:rgb[/:intensity]");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .map_err(|e| HubError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
