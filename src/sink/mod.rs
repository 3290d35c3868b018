//! Event sink module
//!
//! Publishes decoded price events to the downstream message bus.

mod log;
mod redis_stream;

pub use log::LogSink;
pub use redis_stream::RedisStreamSink;

use crate::feed::PriceEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Trait for event sink implementations
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publish one event to the sink's fixed destination
    async fn publish(&self, event: PriceEvent) -> Result<(), PublishError>;
}

/// Sink publish errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// Event could not be serialized
    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    /// Broker rejected the write or is unreachable
    #[error("Broker error: {0}")]
    Broker(#[from] redis::RedisError),
}
