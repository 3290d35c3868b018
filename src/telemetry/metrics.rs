//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Relay counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Text frames handed over by the transport
    FramesReceived,
    /// Events accepted by the sink
    EventsPublished,
    /// Frames dropped because they failed to decode
    DecodeErrors,
    /// Events dropped because the sink rejected them
    PublishErrors,
}

impl CounterMetric {
    pub fn name(self) -> &'static str {
        match self {
            CounterMetric::FramesReceived => "price_relay_frames_received_total",
            CounterMetric::EventsPublished => "price_relay_events_published_total",
            CounterMetric::DecodeErrors => "price_relay_decode_errors_total",
            CounterMetric::PublishErrors => "price_relay_publish_errors_total",
        }
    }
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}

/// Serve the Prometheus scrape endpoint on `0.0.0.0:port`
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}
