//! Coinbase WebSocket feed transport

use super::{
    ConnectionHandle, ConnectionState, FeedError, FeedTransport, FrameListener,
    SubscriptionRequest, TICKER_BATCH_CHANNEL,
};
use crate::ws::{WsClient, WsConfig, WsMessage, WsSession};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

/// Coinbase Exchange WebSocket feed URL
pub const COINBASE_WS_URL: &str = "wss://ws-feed.exchange.coinbase.com";

/// WebSocket transport for the Coinbase ticker feed
///
/// Opens exactly one connection per `connect` call and never reconnects.
pub struct CoinbaseTransport {
    config: WsConfig,
    channels: Vec<String>,
    listener: RwLock<Option<Arc<dyn FrameListener>>>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
}

impl CoinbaseTransport {
    /// Create a transport subscribing to the ticker_batch channel
    pub fn new(config: WsConfig) -> Self {
        tracing::info!(url = %config.url, "WebSocket server URI");
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);

        Self {
            config,
            channels: vec![TICKER_BATCH_CHANNEL.to_string()],
            listener: RwLock::new(None),
            state_tx: Arc::new(state_tx),
        }
    }

    /// Create a transport for the public Coinbase endpoint
    pub fn coinbase() -> Self {
        Self::new(WsConfig::new(COINBASE_WS_URL))
    }

    /// Override the subscribed channel set
    pub fn with_channels(mut self, channels: Vec<String>) -> Self {
        self.channels = channels;
        self
    }

    /// Watch connection state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    fn set_state(state_tx: &watch::Sender<ConnectionState>, state: ConnectionState) {
        let previous = state_tx.send_replace(state);
        if previous != state {
            tracing::debug!(from = ?previous, to = ?state, "Feed state changed");
        }
    }

    fn current_listener(&self) -> Option<Arc<dyn FrameListener>> {
        self.listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deliver frames to the listener until the session ends
    async fn run_receive_loop(
        mut session: WsSession,
        listener: Option<Arc<dyn FrameListener>>,
        state_tx: Arc<watch::Sender<ConnectionState>>,
    ) {
        loop {
            match session.next_message().await {
                Ok(WsMessage::Text(text)) => {
                    Self::set_state(&state_tx, ConnectionState::Receiving);
                    tracing::trace!(payload = %text, "Received message from Coinbase WebSocket");

                    match &listener {
                        Some(listener) => listener.on_frame(text).await,
                        None => tracing::debug!("No frame listener registered, dropping frame"),
                    }
                }
                Ok(WsMessage::Binary(_)) => {
                    // Coinbase only sends text frames on the ticker channels
                }
                Ok(WsMessage::Closed { reason }) => {
                    tracing::info!(reason = ?reason, "WebSocket connection closed");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "WebSocket transport error");
                    break;
                }
            }
        }

        Self::set_state(&state_tx, ConnectionState::Disconnected);
    }
}

#[async_trait]
impl FeedTransport for CoinbaseTransport {
    fn set_frame_listener(&self, listener: Arc<dyn FrameListener>) {
        *self.listener.write().unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    async fn connect(&self, product_ids: &[String]) -> Result<ConnectionHandle, FeedError> {
        let request = SubscriptionRequest::new(self.channels.clone(), product_ids.to_vec());
        let message = request.to_json()?;

        Self::set_state(&self.state_tx, ConnectionState::Connecting);

        let client = WsClient::new(self.config.clone());
        let mut session = match client.connect().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "WebSocket connection error");
                Self::set_state(&self.state_tx, ConnectionState::Disconnected);
                return Err(FeedError::Connection(e));
            }
        };

        tracing::info!("WebSocket connection established");

        if let Err(e) = session.send_text(message.clone()).await {
            tracing::error!(error = %e, "Failed to send subscription message");
            Self::set_state(&self.state_tx, ConnectionState::Disconnected);
            return Err(FeedError::Subscribe(e));
        }

        tracing::info!(message = %message, "Subscription message sent");
        Self::set_state(&self.state_tx, ConnectionState::Subscribed);

        let listener = self.current_listener();
        let state_tx = self.state_tx.clone();
        let task = tokio::spawn(async move {
            Self::run_receive_loop(session, listener, state_tx).await;
        });

        Ok(ConnectionHandle::new(task))
    }

    fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }
}
