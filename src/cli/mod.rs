//! CLI interface for whale-watch
//!
//! Provides subcommands for:
//! - `monitor`: run one detection cycle and deliver alerts
//! - `winrates`: rank the roster by trailing winrate
//! - `sentiment`: aggregate roster-wide long/short bias
//! - `config`: show configuration

mod monitor;
mod sentiment;
mod winrates;

pub use monitor::MonitorArgs;
pub use sentiment::SentimentArgs;
pub use winrates::WinratesArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "whale-watch")]
#[command(about = "Hyperliquid whale position tracker")]
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
    /// Run one detection cycle and deliver alerts
    Monitor(MonitorArgs),
    /// Rank whales by trailing winrate
    Winrates(WinratesArgs),
    /// Show current whale sentiment
    Sentiment(SentimentArgs),
    /// Show configuration
    Config,
}
