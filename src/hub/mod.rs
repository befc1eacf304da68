//! Connection registry and broadcast fan-out.

pub mod broadcast;
pub mod registry;

// Re-export commonly used items
pub use broadcast::BroadcastHub;
pub use registry::{Connection, ConnectionRegistry};
