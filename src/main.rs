use clap::Parser;
use whale_watch::cli::{Cli, Commands};
use whale_watch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = whale_watch::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Monitor(args) => {
            tracing::info!("Starting detection cycle");
            args.execute(&config).await?;
        }
        Commands::Winrates(args) => {
            tracing::info!("Starting winrate report");
            args.execute(&config).await?;
        }
        Commands::Sentiment(args) => {
            tracing::info!("Starting sentiment report");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Roster: {} inline accounts", config.roster.accounts.len());
            println!(
                "  Exchange: {} ({})",
                config.exchange.base_url, config.exchange.instrument
            );
            println!(
                "  Snapshot store: {}",
                config.tracker.snapshot_path.display()
            );
            println!(
                "  Winrate window: {} days (min {} trades)",
                config.tracker.winrate_window_days, config.tracker.min_trades
            );
            println!(
                "  Telegram: {}",
                if config.telegram.credentials().is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
    }

    Ok(())
}
