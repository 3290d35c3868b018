//! Sink that only logs events

use super::{EventSink, PublishError};
use crate::feed::PriceEvent;
use async_trait::async_trait;

/// Logs every event instead of publishing it. Used for dry runs.
#[derive(Debug, Clone)]
pub struct LogSink {
    destination: String,
}

impl LogSink {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

#[async_trait]
impl EventSink for LogSink {
    async fn publish(&self, event: PriceEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(
            destination = %self.destination,
            product_id = %event.product_id,
            sequence = event.sequence,
            payload = %payload,
            "Price event sent"
        );
        Ok(())
    }
}
