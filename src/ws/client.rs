//! Single-session WebSocket client

use super::types::{WsConfig, WsError, WsMessage};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket client that opens one session per `connect` call
pub struct WsClient {
    config: WsConfig,
}

impl WsClient {
    /// Create a new WebSocket client with the given configuration
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    /// Create a new client with just a URL using default config
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::new(WsConfig::new(url))
    }

    /// Get the configured URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Perform the opening handshake
    ///
    /// Fails with `ConnectionFailed` or `Timeout` if the handshake cannot
    /// complete. No retry is attempted.
    pub async fn connect(&self) -> Result<WsSession, WsError> {
        tracing::info!(url = %self.config.url, "Connecting to WebSocket");

        let handshake = connect_async(&self.config.url);
        let (ws_stream, _response) = tokio::time::timeout(self.config.connect_timeout, handshake)
            .await
            .map_err(|_| WsError::Timeout(self.config.connect_timeout))?
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        tracing::info!("WebSocket connected");

        Ok(WsSession::new(ws_stream, &self.config))
    }
}

/// An established WebSocket session
pub struct WsSession {
    write: SplitSink<WsStream, Message>,
    read: SplitStream<WsStream>,
    ping_interval: Interval,
    waiting_for_pong: bool,
}

impl WsSession {
    fn new(ws_stream: WsStream, config: &WsConfig) -> Self {
        let (write, read) = ws_stream.split();

        let mut ping_interval = interval_at(
            Instant::now() + config.ping_interval,
            config.ping_interval,
        );
        ping_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            write,
            read,
            ping_interval,
            waiting_for_pong: false,
        }
    }

    /// Send a text frame
    pub async fn send_text(&mut self, text: String) -> Result<(), WsError> {
        self.write
            .send(Message::Text(text))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Wait for the next data frame or the end of the session
    ///
    /// Control frames are handled internally: pings are answered, pongs clear
    /// the keepalive flag, and a missing pong by the next ping tick is
    /// reported as a receive error.
    pub async fn next_message(&mut self) -> Result<WsMessage, WsError> {
        loop {
            tokio::select! {
                msg = self.read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => return Ok(WsMessage::Text(text)),
                        Some(Ok(Message::Binary(data))) => return Ok(WsMessage::Binary(data)),
                        Some(Ok(Message::Ping(data))) => {
                            self.write.send(Message::Pong(data)).await
                                .map_err(|e| WsError::SendFailed(e.to_string()))?;
                        }
                        Some(Ok(Message::Pong(_))) => {
                            self.waiting_for_pong = false;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let reason = frame.map(|f| format!("{} {}", u16::from(f.code), f.reason));
                            // Flush the queued close reply; the peer may already be gone
                            let _ = self.write.close().await;
                            return Ok(WsMessage::Closed { reason });
                        }
                        Some(Ok(Message::Frame(_))) => {}
                        Some(Err(e)) => {
                            return Err(WsError::ReceiveFailed(e.to_string()));
                        }
                        None => {
                            return Err(WsError::ReceiveFailed("Stream ended unexpectedly".into()));
                        }
                    }
                }

                _ = self.ping_interval.tick() => {
                    if self.waiting_for_pong {
                        return Err(WsError::ReceiveFailed("Pong timeout".into()));
                    }
                    self.write.send(Message::Ping(vec![])).await
                        .map_err(|e| WsError::SendFailed(e.to_string()))?;
                    self.waiting_for_pong = true;
                }
            }
        }
    }
}
