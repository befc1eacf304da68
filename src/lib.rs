//! # LED Hub - shared color state for ESP32 light clients
//!
//! A small broadcast hub: HTTP control routes push colors and reset commands,
//! and a WebSocket channel keeps every connected device on the same
//! color/intensity pair.
//!
//! ## Features
//!
//! - **Shared state**: one `{color, intensity}` pair, last write wins
//! - **Late joiners converge**: each new client gets the current state first
//! - **Control API**: `POST /reset-all`, `POST /led/:rgb[/:intensity]`, `GET /ping`
//! - **Library + Binary**: embed the router or run the standalone server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use led_hub::{start_web_server, WebConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     start_web_server(WebConfig::default().with_port(3000)).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod hub;
pub mod state;
pub mod web;

// Re-export public API
pub use error::{HubError, Result};
pub use hub::{BroadcastHub, Connection, ConnectionRegistry};
pub use state::{HubMessage, LedState, StateStore, StateUpdate};
pub use web::{create_app, start_web_server, HubApp, WebConfig};

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 3000;
