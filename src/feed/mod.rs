//! Price feed module
//!
//! Streams ticker frames from the Coinbase WebSocket feed and decodes them
//! into `PriceEvent`s.

mod coinbase;
mod decoder;
mod subscription;
mod types;

pub use coinbase::{CoinbaseTransport, COINBASE_WS_URL};
pub use decoder::{decode, DecodeError};
pub use subscription::{SubscriptionRequest, SUBSCRIBE_TYPE, TICKER_BATCH_CHANNEL};
pub use types::PriceEvent;

use crate::ws::WsError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{AbortHandle, JoinHandle};

/// Receives every inbound text frame, in arrival order
///
/// The transport awaits each call before reading the next frame.
#[async_trait]
pub trait FrameListener: Send + Sync {
    async fn on_frame(&self, frame: String);
}

/// Trait for feed transport implementations
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Register the frame listener. Must be called before `connect`;
    /// the last registration before `connect` wins.
    fn set_frame_listener(&self, listener: Arc<dyn FrameListener>);

    /// Open the connection and subscribe to the given instruments
    ///
    /// Resolves once the subscription has been sent. Frame delivery then
    /// continues on the task owned by the returned handle.
    async fn connect(&self, product_ids: &[String]) -> Result<ConnectionHandle, FeedError>;

    /// Current connection state
    fn state(&self) -> ConnectionState;
}

/// Feed connection lifecycle
///
/// `Disconnected -> Connecting -> Subscribed -> Receiving -> Disconnected`.
/// There is no reconnecting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Subscribed,
    Receiving,
}

/// Feed transport errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Handshake failed
    #[error("Feed connection failed: {0}")]
    Connection(#[source] WsError),
    /// Subscription request could not be written
    #[error("Failed to send subscription: {0}")]
    Subscribe(#[source] WsError),
    /// Subscription request could not be serialized
    #[error("Failed to encode subscription: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handle to the frame delivery task of an established connection
pub struct ConnectionHandle {
    task: JoinHandle<()>,
}

impl ConnectionHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Wait until the connection is closed or fails
    pub async fn closed(self) {
        if let Err(e) = self.task.await {
            if e.is_panic() {
                tracing::error!(error = %e, "Frame delivery task panicked");
            }
        }
    }

    /// Handle that stops frame delivery immediately when aborted
    pub fn abort_handle(&self) -> AbortHandle {
        self.task.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
