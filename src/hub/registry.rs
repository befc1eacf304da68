//! Connection handles and the registry of currently open connections.

use crate::error::{HubError, Result};
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

/// Outbound handle for one realtime client.
///
/// Frames are queued on an unbounded channel; a writer task owned by the
/// connection drains it into the socket. The handle counts as open for as long
/// as that receiving half is alive.
#[derive(Debug, Clone)]
pub struct Connection {
    id: Uuid,
    tx: mpsc::UnboundedSender<String>,
}

impl Connection {
    /// Create a handle with a fresh id and the receiver its writer should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Self {
            id: Uuid::new_v4(),
            tx,
        };
        (connection, rx)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Queue a text frame. Never blocks.
    pub fn send(&self, payload: impl Into<String>) -> Result<()> {
        self.tx
            .send(payload.into())
            .map_err(|_| HubError::ConnectionClosed(self.id))
    }
}

/// The set of registered connections, keyed by id.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<Uuid, Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection` and queue `first` as the very first frame it sees.
    ///
    /// Both happen under the write lock, so no broadcast can reach the
    /// connection before `first`.
    pub async fn register(&self, connection: Connection, first: impl Into<String>) -> Result<()> {
        let mut connections = self.connections.write().await;
        connection.send(first)?;
        debug!("Registered connection {}", connection.id);
        connections.insert(connection.id, connection);
        Ok(())
    }

    /// Remove a connection. Returns false if it was not registered.
    pub async fn unregister(&self, id: Uuid) -> bool {
        let removed = self.connections.write().await.remove(&id).is_some();
        if removed {
            debug!("Unregistered connection {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }

    /// Copy of the current handles, taken under the read lock.
    pub async fn snapshot(&self) -> Vec<Connection> {
        self.connections.read().await.values().cloned().collect()
    }

    /// Queue `payload` on every open connection and return how many accepted it.
    ///
    /// Closed connections are skipped. A failed send is logged and the
    /// remaining connections still get the payload.
    pub async fn broadcast(&self, payload: &str) -> usize {
        let targets = self.snapshot().await;
        let mut delivered = 0;

        for connection in &targets {
            if !connection.is_open() {
                debug!("Skipping closed connection {}", connection.id);
                continue;
            }
            match connection.send(payload) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Failed to send to {}: {}", connection.id, e),
            }
        }

        debug!(
            "Broadcast delivered to {}/{} connections",
            delivered,
            targets.len()
        );
        delivered
    }
}
