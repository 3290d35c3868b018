//! Price relay service

use super::stats::{RelayStats, RelayStatsSnapshot};
use crate::feed::{decode, ConnectionHandle, FeedError, FeedTransport, FrameListener};
use crate::sink::EventSink;
use crate::telemetry::CounterMetric;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Relay startup errors
#[derive(Debug, Error)]
pub enum RelayError {
    /// The feed connection could not be established
    #[error("Failed to start fetching prices: {0}")]
    Connection(#[from] FeedError),
}

/// Coordinates the feed transport and the event sink
pub struct RelayService<T: FeedTransport, S: EventSink> {
    transport: Arc<T>,
    sink: Arc<S>,
    product_ids: Vec<String>,
    stats: Arc<RelayStats>,
}

impl<T: FeedTransport, S: EventSink + 'static> RelayService<T, S> {
    /// Create a relay for the given instruments
    pub fn new(transport: Arc<T>, sink: Arc<S>, product_ids: Vec<String>) -> Self {
        Self {
            transport,
            sink,
            product_ids,
            stats: Arc::new(RelayStats::default()),
        }
    }

    /// Register the frame handler and connect the feed
    ///
    /// A connection failure is returned to the caller as-is; there is no retry.
    pub async fn start(&self) -> Result<ConnectionHandle, RelayError> {
        tracing::info!(product_ids = ?self.product_ids, "Price relay has started fetching prices");

        let handler = FrameHandler {
            sink: self.sink.clone(),
            stats: self.stats.clone(),
        };
        self.transport.set_frame_listener(Arc::new(handler));

        self.transport
            .connect(&self.product_ids)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to start fetching prices");
                RelayError::Connection(e)
            })
    }

    /// Instruments this relay subscribes to
    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    pub fn stats(&self) -> RelayStatsSnapshot {
        self.stats.snapshot()
    }
}

/// Decodes each frame and forwards valid events to the sink
struct FrameHandler<S: EventSink> {
    sink: Arc<S>,
    stats: Arc<RelayStats>,
}

#[async_trait]
impl<S: EventSink + 'static> FrameListener for FrameHandler<S> {
    async fn on_frame(&self, frame: String) {
        self.stats.record(CounterMetric::FramesReceived);

        let event = match decode(&frame) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, payload = %frame, "Failed to parse price update");
                self.stats.record(CounterMetric::DecodeErrors);
                return;
            }
        };

        let product_id = event.product_id.clone();
        let sequence = event.sequence;
        match self.sink.publish(event).await {
            Ok(()) => self.stats.record(CounterMetric::EventsPublished),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    product_id = %product_id,
                    sequence,
                    "Failed to publish price event"
                );
                self.stats.record(CounterMetric::PublishErrors);
            }
        }
    }
}
