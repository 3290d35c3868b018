//! CLI interface for price-relay
//!
//! Provides subcommands for:
//! - `run`: Relay the price feed to the message bus
//! - `config`: Show the effective configuration
//! - `subscription`: Show the subscription frame sent after connecting

mod run;

pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "price-relay")]
#[command(about = "Relays Coinbase ticker updates to a Redis stream")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start relaying prices
    Run(RunArgs),
    /// Show configuration
    Config,
    /// Show the subscription message
    Subscription,
}
