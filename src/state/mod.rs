//! Shared LED state and the messages exchanged with clients.
//!
//! The state is a single color/intensity pair. It lives for the whole process,
//! is never persisted, and is overwritten by whichever client wrote last.

pub mod data;
pub mod store;

// Re-export commonly used items
pub use data::{HubMessage, LedState, StateUpdate, DEFAULT_COLOR, DEFAULT_INTENSITY};
pub use store::StateStore;
