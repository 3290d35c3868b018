//! WebSocket types and configuration

use std::time::Duration;
use thiserror::Error;

/// WebSocket client configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// WebSocket URL to connect to
    pub url: String,
    /// Maximum time allowed for the opening handshake
    pub connect_timeout: Duration,
    /// Interval for sending ping frames
    pub ping_interval: Duration,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(10),
            ping_interval: Duration::from_secs(30),
        }
    }
}

impl WsConfig {
    /// Create a new config with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set handshake timeout
    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.connect_timeout = d;
        self
    }

    /// Set ping interval
    pub fn ping_interval(mut self, d: Duration) -> Self {
        self.ping_interval = d;
        self
    }
}

/// Inbound WebSocket events surfaced to the session owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsMessage {
    /// Text frame
    Text(String),
    /// Binary frame
    Binary(Vec<u8>),
    /// Connection closed by the peer or locally
    Closed { reason: Option<String> },
}

/// WebSocket errors
#[derive(Debug, Clone, Error)]
pub enum WsError {
    /// Handshake could not complete
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Handshake did not finish within the configured timeout
    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),
    /// Read side failed mid-stream
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
    /// Send failed
    #[error("Send failed: {0}")]
    SendFailed(String),
}
