//! Fan-out of state changes and control commands to every realtime client.

use super::registry::{Connection, ConnectionRegistry};
use crate::error::Result;
use crate::state::{HubMessage, LedState, StateStore, StateUpdate, DEFAULT_INTENSITY};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Ties the [`StateStore`] to the [`ConnectionRegistry`].
///
/// Anything that changes the state holds the state lock until its broadcast has
/// been queued, and joins take the same lock, so a joining client either sees
/// the new state in its snapshot or receives the broadcast, never neither.
#[derive(Debug, Default)]
pub struct BroadcastHub {
    store: StateStore,
    registry: ConnectionRegistry,
}

impl BroadcastHub {
    pub fn new(initial: LedState) -> Self {
        Self {
            store: StateStore::new(initial),
            registry: ConnectionRegistry::new(),
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.len().await
    }

    /// Register a new client and queue the current state as its first frame.
    pub async fn join(&self) -> Result<(Uuid, mpsc::UnboundedReceiver<String>)> {
        let state = self.store.lock().await;
        let snapshot = HubMessage::from(state.clone()).to_json()?;

        let (connection, rx) = Connection::new();
        let id = connection.id();
        self.registry.register(connection, snapshot).await?;
        Ok((id, rx))
    }

    pub async fn leave(&self, id: Uuid) -> bool {
        self.registry.unregister(id).await
    }

    /// Handle one inbound realtime message.
    ///
    /// Anything that is not a JSON object, or carries no usable field, is
    /// dropped without a reply. Otherwise the merged state is broadcast in full
    /// to every client, the sender included, and returned.
    pub async fn handle_message(&self, text: &str) -> Option<LedState> {
        let Some(update) = StateUpdate::parse(text) else {
            debug!("Ignoring malformed message: {}", text);
            return None;
        };

        let mut state = self.store.lock().await;
        if !state.apply(update) {
            return None;
        }
        let updated = state.clone();
        self.broadcast(&HubMessage::from(updated.clone())).await;
        Some(updated)
    }

    /// Serialize `message` once and queue it on every open connection.
    pub async fn broadcast(&self, message: &HubMessage) -> usize {
        match message.to_json() {
            Ok(payload) => self.registry.broadcast(&payload).await,
            Err(e) => {
                warn!("Failed to serialize broadcast: {}", e);
                0
            }
        }
    }

    /// Tell every device to reset. The shared state is left alone.
    pub async fn trigger_reset_all(&self) -> usize {
        let delivered = self.broadcast(&HubMessage::reset()).await;
        info!("Reset command sent to {} clients", delivered);
        delivered
    }

    /// Push a color and intensity to every client and make it the shared state.
    pub async fn set_color_and_intensity(&self, rgb: &str, intensity: &str) -> usize {
        let mut state = self.store.lock().await;
        state.apply(LedState::new(rgb, intensity).into());
        let delivered = self.broadcast(&HubMessage::from(state.clone())).await;
        info!(
            "Color sent: {} Intensity: {} ({} clients)",
            rgb, intensity, delivered
        );
        delivered
    }

    /// Same as [`set_color_and_intensity`](Self::set_color_and_intensity) at full intensity.
    pub async fn set_color_default_intensity(&self, rgb: &str) -> usize {
        self.set_color_and_intensity(rgb, DEFAULT_INTENSITY).await
    }
}
