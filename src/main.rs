use clap::Parser;
use price_relay::cli::{Cli, Commands};
use price_relay::config::Config;
use price_relay::feed::SubscriptionRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; defaults apply only when the file is absent
    if !std::path::Path::new(&cli.config).exists() {
        eprintln!("Warning: {} not found, using default configuration", cli.config);
    }
    let config = Config::load_or_default(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Run(args) => {
            let _telemetry = price_relay::telemetry::init_telemetry(&config.telemetry)?;
            tracing::info!("Starting price relay");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Feed: {}", config.feed.url);
            println!("  Channels: {}", config.feed.channels.join(", "));
            println!("  Instruments: {}", config.feed.product_ids.join(", "));
            println!("  Sink: {} -> {}", config.sink.redis_url, config.sink.stream);
            match config.telemetry.metrics_port {
                Some(port) => println!("  Metrics: :{}", port),
                None => println!("  Metrics: disabled"),
            }
        }
        Commands::Subscription => {
            let request = SubscriptionRequest::new(
                config.feed.channels.clone(),
                config.feed.product_ids.clone(),
            );
            println!("{}", request.to_json()?);
        }
    }

    Ok(())
}
