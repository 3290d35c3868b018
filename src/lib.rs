//! price-relay: real-time market-data relay
//!
//! This library provides the core components for:
//! - Streaming ticker frames from the Coinbase WebSocket feed
//! - Decoding frames into `PriceEvent`s with exact decimal text
//! - Republishing events onto a Redis stream
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod feed;
pub mod relay;
pub mod sink;
pub mod telemetry;
pub mod ws;
