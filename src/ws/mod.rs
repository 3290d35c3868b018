//! WebSocket session layer
//!
//! Opens a single WebSocket session, keeps it alive with ping/pong and
//! streams inbound frames. Reconnection is deliberately left to the caller.

mod client;
mod types;

pub use client::{WsClient, WsSession};
pub use types::{WsConfig, WsError, WsMessage};
