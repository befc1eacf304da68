//! Data structures for the shared LED state and the wire messages built from it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Color every client starts from until someone changes it.
pub const DEFAULT_COLOR: &str = "255,0,0";

/// Intensity every client starts from, and the one used when a color is pushed alone.
pub const DEFAULT_INTENSITY: &str = "100";

/// The single color/intensity pair shared by every connected client.
///
/// Neither field is validated: whatever a client sends becomes canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    /// Color as `"R,G,B"` decimal components
    pub color: String,
    /// Intensity as a decimal percentage
    pub intensity: String,
}

impl LedState {
    pub fn new(color: impl Into<String>, intensity: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            intensity: intensity.into(),
        }
    }
}

impl Default for LedState {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, DEFAULT_INTENSITY)
    }
}

/// A partial update received from a realtime client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub color: Option<String>,
    pub intensity: Option<String>,
}

impl StateUpdate {
    /// Parse an inbound realtime message.
    ///
    /// Returns `None` when the text is not a JSON object. Inside an object only
    /// non-empty string values for `color` and `intensity` are picked up; every
    /// other key or value type is dropped.
    pub fn parse(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        let object = value.as_object()?;

        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        Some(Self {
            color: field("color"),
            intensity: field("intensity"),
        })
    }

    /// True when no recognized field was supplied.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.intensity.is_none()
    }
}

impl From<LedState> for StateUpdate {
    fn from(state: LedState) -> Self {
        Self {
            color: Some(state.color),
            intensity: Some(state.intensity),
        }
    }
}

/// Messages pushed from the hub to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HubMessage {
    /// Full color/intensity state
    State(LedState),
    /// Tells every device to reboot
    Reset { reset: bool },
}

impl HubMessage {
    pub fn reset() -> Self {
        Self::Reset { reset: true }
    }

    /// Encode the message as a JSON text frame.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<LedState> for HubMessage {
    fn from(state: LedState) -> Self {
        Self::State(state)
    }
}
