//! Configuration types for price-relay

use crate::feed::{COINBASE_WS_URL, TICKER_BATCH_CHANNEL};
use crate::telemetry::LogFormat;
use crate::ws::WsConfig;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price feed configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// WebSocket endpoint
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Instruments to subscribe to, in subscription order
    #[serde(default = "default_product_ids")]
    pub product_ids: Vec<String>,

    /// Feed channels to subscribe to
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,

    /// Handshake timeout (seconds)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Keepalive ping interval (seconds)
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
}

fn default_feed_url() -> String {
    COINBASE_WS_URL.to_string()
}
fn default_product_ids() -> Vec<String> {
    vec!["BTC-USD".to_string()]
}
fn default_channels() -> Vec<String> {
    vec![TICKER_BATCH_CHANNEL.to_string()]
}
fn default_connect_timeout_secs() -> u64 {
    10
}
fn default_ping_interval_secs() -> u64 {
    30
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            product_ids: default_product_ids(),
            channels: default_channels(),
            connect_timeout_secs: default_connect_timeout_secs(),
            ping_interval_secs: default_ping_interval_secs(),
        }
    }
}

impl FeedConfig {
    /// WebSocket settings for the feed transport
    pub fn ws_config(&self) -> WsConfig {
        WsConfig::new(self.url.clone())
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .ping_interval(Duration::from_secs(self.ping_interval_secs))
    }
}

/// Message bus configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Destination stream name
    #[serde(default = "default_stream")]
    pub stream: String,

    /// Approximate stream length cap (unbounded when absent)
    #[serde(default)]
    pub max_len: Option<usize>,
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}
fn default_stream() -> String {
    "bitcoin-price".to_string()
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            stream: default_stream(),
            max_len: None,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port (disabled when absent)
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, using defaults only when the file does not exist
    ///
    /// Unreadable or malformed files are errors.
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) if is_not_found(&e) => Ok(Self::default()),
            Err(e) => Err(e.context(format!("Invalid config file {}", path.display()))),
        }
    }

    /// Reject configurations the relay cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.feed.url.trim().is_empty() {
            anyhow::bail!("feed.url must not be empty");
        }
        if self.feed.product_ids.is_empty() {
            anyhow::bail!("feed.product_ids must list at least one instrument");
        }
        if self.feed.channels.is_empty() {
            anyhow::bail!("feed.channels must list at least one channel");
        }
        if self.sink.stream.trim().is_empty() {
            anyhow::bail!("sink.stream must not be empty");
        }
        if self.feed.ping_interval_secs == 0 {
            anyhow::bail!("feed.ping_interval_secs must be positive");
        }
        if self.feed.connect_timeout_secs == 0 {
            anyhow::bail!("feed.connect_timeout_secs must be positive");
        }
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}
