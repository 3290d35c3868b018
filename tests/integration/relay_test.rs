//! End-to-end relay tests against a local feed server

use crate::common::{closed_port_url, FeedServer, RecordingSink, TickerFrame};
use price_relay::feed::{CoinbaseTransport, ConnectionState, FeedError, FeedTransport};
use price_relay::relay::{RelayError, RelayService};
use price_relay::ws::WsConfig;
use std::sync::Arc;
use std::time::Duration;

fn relay_for(
    url: String,
    product_ids: &[&str],
) -> (
    RelayService<CoinbaseTransport, RecordingSink>,
    Arc<CoinbaseTransport>,
    Arc<RecordingSink>,
) {
    let transport = Arc::new(CoinbaseTransport::new(
        WsConfig::new(url).connect_timeout(Duration::from_secs(2)),
    ));
    let sink = Arc::new(RecordingSink::default());
    let relay = RelayService::new(
        transport.clone(),
        sink.clone(),
        product_ids.iter().map(|s| s.to_string()).collect(),
    );
    (relay, transport, sink)
}

#[tokio::test]
async fn test_valid_frame_published_once() {
    let mut server = FeedServer::start(vec![TickerFrame::default().to_json()]).await;
    let (relay, transport, sink) = relay_for(server.url.clone(), &["BTC-USD"]);

    let handle = relay.start().await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle.closed())
        .await
        .expect("feed should close");
    (&mut server.task).await.unwrap();

    assert_eq!(
        server.subscriptions.recv().await.unwrap(),
        r#"{"type":"subscribe","channels":["ticker_batch"],"product_ids":["BTC-USD"]}"#
    );

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].price, "50000.0");
    assert_eq!(events[0].sequence, 1234567890);
    assert_eq!(events[0].product_id, "BTC-USD");
    assert_eq!(transport.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_invalid_frame_dropped_and_next_frame_processed() {
    let valid = TickerFrame {
        price: "50123.45",
        ..Default::default()
    };
    let server = FeedServer::start(vec!["Invalid JSON".to_string(), valid.to_json()]).await;
    let (relay, _transport, sink) = relay_for(server.url.clone(), &["BTC-USD"]);

    let handle = relay.start().await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle.closed())
        .await
        .expect("feed should close");
    server.task.await.unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].price, "50123.45");

    let stats = relay.stats();
    assert_eq!(stats.frames_received, 2);
    assert_eq!(stats.decode_errors, 1);
    assert_eq!(stats.events_published, 1);
}

#[tokio::test]
async fn test_connection_failure_propagates_from_start() {
    let (relay, transport, sink) = relay_for(closed_port_url().await, &["BTC-USD"]);

    let result = relay.start().await;

    assert!(matches!(
        result,
        Err(RelayError::Connection(FeedError::Connection(_)))
    ));
    assert!(sink.events().is_empty());
    assert_eq!(transport.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_publish_order_matches_arrival_order() {
    let frames = (1..=3)
        .map(|sequence| {
            TickerFrame {
                sequence,
                ..Default::default()
            }
            .to_json()
        })
        .collect();
    let server = FeedServer::start(frames).await;
    let (relay, _transport, sink) = relay_for(server.url.clone(), &["BTC-USD", "ETH-USD"]);

    let handle = relay.start().await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle.closed())
        .await
        .expect("feed should close");
    server.task.await.unwrap();

    let sequences: Vec<i64> = sink.events().iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}
