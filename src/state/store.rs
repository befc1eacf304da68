//! Process-wide holder for the current LED state.

use super::data::{LedState, StateUpdate};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

impl LedState {
    /// Merge a partial update into this state, last write wins per field.
    ///
    /// Returns true when at least one field was supplied, even if the value
    /// matches what is already stored.
    pub fn apply(&mut self, update: StateUpdate) -> bool {
        let mut accepted = false;
        if let Some(color) = update.color {
            self.color = color;
            accepted = true;
        }
        if let Some(intensity) = update.intensity {
            self.intensity = intensity;
            accepted = true;
        }
        accepted
    }
}

/// Owns the shared [`LedState`]; every read and write goes through one mutex.
#[derive(Debug, Default)]
pub struct StateStore {
    inner: Mutex<LedState>,
}

impl StateStore {
    pub fn new(initial: LedState) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    /// Current snapshot.
    pub async fn get(&self) -> LedState {
        self.inner.lock().await.clone()
    }

    /// Apply `update` and return the resulting state and whether anything was accepted.
    pub async fn apply_partial(&self, update: StateUpdate) -> (LedState, bool) {
        let mut state = self.inner.lock().await;
        let changed = state.apply(update);
        if changed {
            debug!("State updated: color={} intensity={}", state.color, state.intensity);
        }
        (state.clone(), changed)
    }

    /// Hold the state lock so a read-modify-broadcast sequence is not interleaved
    /// with other writers.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, LedState> {
        self.inner.lock().await
    }
}
