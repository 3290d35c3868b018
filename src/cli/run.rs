//! Run command implementation

use crate::config::Config;
use crate::feed::CoinbaseTransport;
use crate::relay::RelayService;
use crate::sink::{EventSink, LogSink, RedisStreamSink};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Log events instead of publishing them to Redis
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        if self.dry_run {
            tracing::info!("Dry run: events will be logged, not published");
            let sink = Arc::new(LogSink::new(config.sink.stream.clone()));
            return relay(config, sink).await;
        }

        let sink = Arc::new(RedisStreamSink::connect(&config.sink).await?);
        relay(config, sink).await
    }
}

/// Run the relay until the feed connection ends or Ctrl-C is received
///
/// Returns an error when the feed ends on its own so supervisors see a
/// non-zero exit status.
async fn relay<S: EventSink + 'static>(config: &Config, sink: Arc<S>) -> anyhow::Result<()> {
    let transport = Arc::new(
        CoinbaseTransport::new(config.feed.ws_config()).with_channels(config.feed.channels.clone()),
    );
    let service = RelayService::new(transport, sink, config.feed.product_ids.clone());

    let handle = service.start().await?;
    let abort = handle.abort_handle();

    let feed_ended = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            abort.abort();
            false
        }
        _ = handle.closed() => {
            tracing::warn!("Feed connection ended, no further events will be relayed");
            true
        }
    };

    let stats = service.stats();
    tracing::info!(
        frames_received = stats.frames_received,
        events_published = stats.events_published,
        decode_errors = stats.decode_errors,
        publish_errors = stats.publish_errors,
        "Price relay stopped"
    );

    if feed_ended {
        anyhow::bail!("Feed connection ended");
    }
    Ok(())
}
