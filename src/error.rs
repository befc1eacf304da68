//! Error handling for the LED hub crate.

/// A specialized `Result` type for LED hub operations.
pub type Result<T> = std::result::Result<T, HubError>;

/// The main error type for LED hub operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The receiving side of a connection has gone away
    #[error("Connection {0} is closed")]
    ConnectionClosed(uuid::Uuid),
}

impl HubError {
    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
