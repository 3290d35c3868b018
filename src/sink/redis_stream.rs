//! Redis stream sink

use super::{EventSink, PublishError};
use crate::config::SinkConfig;
use crate::feed::PriceEvent;
use async_trait::async_trait;
use chrono::Utc;
use redis::aio::MultiplexedConnection;
use redis::streams::StreamMaxlen;
use redis::AsyncCommands;

/// Appends each event to a Redis stream
///
/// Entries carry `product_id` (the routing key), `event` (the JSON-encoded
/// `PriceEvent`) and `relayed_at` (local RFC 3339 timestamp).
pub struct RedisStreamSink {
    conn: MultiplexedConnection,
    stream: String,
    max_len: Option<usize>,
}

impl RedisStreamSink {
    /// Connect to the broker configured in `config`
    pub async fn connect(config: &SinkConfig) -> Result<Self, PublishError> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let conn = client.get_multiplexed_async_connection().await?;

        tracing::info!(
            stream = %config.stream,
            max_len = ?config.max_len,
            "Connected to Redis"
        );

        Ok(Self {
            conn,
            stream: config.stream.clone(),
            max_len: config.max_len,
        })
    }

    fn entry_fields(event: &PriceEvent) -> Result<[(&'static str, String); 3], PublishError> {
        Ok([
            ("product_id", event.product_id.clone()),
            ("event", serde_json::to_string(event)?),
            ("relayed_at", Utc::now().to_rfc3339()),
        ])
    }
}

#[async_trait]
impl EventSink for RedisStreamSink {
    async fn publish(&self, event: PriceEvent) -> Result<(), PublishError> {
        let fields = Self::entry_fields(&event)?;
        let mut conn = self.conn.clone();

        let id: String = match self.max_len {
            Some(n) => {
                conn.xadd_maxlen(self.stream.as_str(), StreamMaxlen::Approx(n), "*", &fields[..])
                    .await?
            }
            None => conn.xadd(self.stream.as_str(), "*", &fields[..]).await?,
        };

        tracing::debug!(
            stream = %self.stream,
            id = %id,
            product_id = %event.product_id,
            sequence = event.sequence,
            "Price event published"
        );
        Ok(())
    }
}
