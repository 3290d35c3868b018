//! Subscription request codec

use serde::Serialize;

/// Type tag carried by every subscription request
pub const SUBSCRIBE_TYPE: &str = "subscribe";

/// Channel delivering batched ticker updates
pub const TICKER_BATCH_CHANNEL: &str = "ticker_batch";

/// Outbound control message sent once right after the handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionRequest {
    #[serde(rename = "type")]
    kind: &'static str,
    channels: Vec<String>,
    product_ids: Vec<String>,
}

impl SubscriptionRequest {
    /// Build a request for the given channels and instruments, order preserved
    pub fn new(channels: Vec<String>, product_ids: Vec<String>) -> Self {
        Self {
            kind: SUBSCRIBE_TYPE,
            channels,
            product_ids,
        }
    }

    /// Build a request for the ticker_batch channel
    pub fn ticker_batch(product_ids: Vec<String>) -> Self {
        Self::new(vec![TICKER_BATCH_CHANNEL.to_string()], product_ids)
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    /// Serialize to the wire format
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
