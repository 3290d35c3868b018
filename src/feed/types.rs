//! Price feed types

use serde::{Deserialize, Serialize};

/// A single ticker update from the exchange feed
///
/// Numeric quote fields are kept as the exact decimal text the exchange sent.
/// They are never parsed here so the published event carries the original
/// precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEvent {
    /// Frame kind tag (e.g. "ticker")
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-feed ordering counter
    pub sequence: i64,
    /// Instrument identifier (e.g. "BTC-USD")
    pub product_id: String,
    pub price: String,
    pub open_24h: String,
    pub volume_24h: String,
    pub low_24h: String,
    pub high_24h: String,
    pub volume_30d: String,
    pub best_bid: String,
    pub best_bid_size: String,
    pub best_ask: String,
    pub best_ask_size: String,
    /// Trade direction ("buy" or "sell")
    pub side: String,
    /// ISO-8601 timestamp as provided by the feed
    pub time: String,
    pub trade_id: i64,
    pub last_size: String,
}
