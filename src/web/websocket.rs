//! WebSocket handler for the realtime state channel.
//!
//! Each client gets the current state as soon as it joins, may send partial
//! `{"color", "intensity"}` updates, and receives the full state whenever any
//! client (or the control API) changes it.

use crate::hub::BroadcastHub;
use crate::web::router::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// WebSocket upgrade handler.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    upgrade(ws, state).await
}

/// Fallback for every unrouted path.
///
/// Devices connect to whatever path they were flashed with (usually `/`), so
/// any WebSocket upgrade joins the channel. Plain requests still get a 404.
pub async fn fallback_handler(
    ws: Option<WebSocketUpgrade>,
    State(state): State<AppState>,
) -> Response {
    match ws {
        Some(ws) => upgrade(ws, state).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn upgrade(ws: WebSocketUpgrade, state: AppState) -> Response {
    let connected = state.hub.connection_count().await;
    if connected >= state.max_connections {
        warn!(
            "Refusing WebSocket client: {} of {} connections in use",
            connected, state.max_connections
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections.").into_response();
    }

    ws.on_upgrade(move |socket| handle_websocket(socket, state.hub))
}

/// Drive one WebSocket connection from join to close.
async fn handle_websocket(socket: WebSocket, hub: Arc<BroadcastHub>) {
    let (client_id, mut outbound) = match hub.join().await {
        Ok(joined) => joined,
        Err(e) => {
            warn!("Failed to register WebSocket client: {}", e);
            return;
        }
    };
    info!("WebSocket client connected: {}", client_id);

    let (mut sender, mut receiver) = socket.split();

    // Drain queued frames into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if let Err(e) = sender.send(Message::Text(payload)).await {
                warn!("Failed to send message to client {}: {}", client_id, e);
                break;
            }
        }
    });

    let recv_hub = Arc::clone(&hub);
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    info!("WS received from {}: {}", client_id, text);
                    recv_hub.handle_message(&text).await;
                }
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        info!("WS received from {}: {}", client_id, text);
                        recv_hub.handle_message(&text).await;
                    }
                    Err(_) => debug!("Ignoring non UTF-8 binary frame from {}", client_id),
                },
                Ok(Message::Close(_)) => {
                    debug!("Close frame from {}", client_id);
                    break;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    debug!("Control frame from {}", client_id);
                }
                Err(e) => {
                    warn!("WebSocket error for client {}: {}", client_id, e);
                    break;
                }
            }
        }
    });

    // Whichever side finishes first ends the connection
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            debug!("Receive task completed for client {}", client_id);
        }
        _ = &mut send_task => {
            recv_task.abort();
            debug!("Send task completed for client {}", client_id);
        }
    }

    hub.leave(client_id).await;
    info!("WebSocket client disconnected: {}", client_id);
}
