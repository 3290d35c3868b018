//! Relay module
//!
//! Wires the feed transport to the event sink: every inbound frame is decoded
//! and, when valid, published in arrival order.

mod service;
mod stats;

pub use service::{RelayError, RelayService};
pub use stats::{RelayStats, RelayStatsSnapshot};
