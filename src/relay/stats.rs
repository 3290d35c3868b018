//! Relay counters

use crate::telemetry::{increment_counter, CounterMetric};
use std::sync::atomic::{AtomicU64, Ordering};

/// In-process relay counters, mirrored to the metrics recorder
#[derive(Debug, Default)]
pub struct RelayStats {
    frames_received: AtomicU64,
    events_published: AtomicU64,
    decode_errors: AtomicU64,
    publish_errors: AtomicU64,
}

/// Point-in-time copy of `RelayStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStatsSnapshot {
    pub frames_received: u64,
    pub events_published: u64,
    pub decode_errors: u64,
    pub publish_errors: u64,
}

impl RelayStats {
    pub fn record(&self, metric: CounterMetric) {
        let counter = match metric {
            CounterMetric::FramesReceived => &self.frames_received,
            CounterMetric::EventsPublished => &self.events_published,
            CounterMetric::DecodeErrors => &self.decode_errors,
            CounterMetric::PublishErrors => &self.publish_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        increment_counter(metric);
    }

    pub fn snapshot(&self) -> RelayStatsSnapshot {
        RelayStatsSnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            events_published: self.events_published.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            publish_errors: self.publish_errors.load(Ordering::Relaxed),
        }
    }
}
