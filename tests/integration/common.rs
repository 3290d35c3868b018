//! Shared fixtures: a local feed server and a recording sink

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use price_relay::feed::PriceEvent;
use price_relay::sink::{EventSink, PublishError};
use std::sync::Mutex;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// Ticker frame builder with realistic defaults
pub struct TickerFrame {
    pub sequence: i64,
    pub product_id: &'static str,
    pub price: &'static str,
}

impl Default for TickerFrame {
    fn default() -> Self {
        Self {
            sequence: 1234567890,
            product_id: "BTC-USD",
            price: "50000.0",
        }
    }
}

impl TickerFrame {
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"type":"ticker","sequence":{},"product_id":"{}","price":"{}","open_24h":"48000.0","volume_24h":"1000.0","low_24h":"47000.0","high_24h":"51000.0","volume_30d":"30000.0","best_bid":"49900.0","best_bid_size":"1.5","best_ask":"50100.0","best_ask_size":"2.0","side":"buy","time":"2024-10-14T15:38:52.418-04:00","trade_id":987654321,"last_size":"0.5"}}"#,
            self.sequence, self.product_id, self.price
        )
    }
}

/// Sink that keeps every published event
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<PriceEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<PriceEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, event: PriceEvent) -> Result<(), PublishError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Local WebSocket feed that accepts one client, forwards the client's
/// subscription message, plays `frames` and then closes the connection
pub struct FeedServer {
    pub url: String,
    pub subscriptions: mpsc::Receiver<String>,
    pub task: JoinHandle<()>,
}

impl FeedServer {
    pub async fn start(frames: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        let (sub_tx, subscriptions) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

            let subscription = ws.next().await.unwrap().unwrap().into_text().unwrap();
            sub_tx.send(subscription).await.unwrap();

            for frame in frames {
                ws.send(Message::Text(frame)).await.unwrap();
            }
            ws.close(None).await.unwrap();
        });

        Self {
            url,
            subscriptions,
            task,
        }
    }
}

/// URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}
