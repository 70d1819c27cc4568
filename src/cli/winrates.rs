//! Winrates command implementation

use crate::config::Config;
use crate::exchange::{InfoClient, MarketDataClient};
use crate::roster::{short_address, Roster};
use crate::score::{self, PerformanceScore};
use chrono::Utc;
use clap::Args;
use futures_util::{stream, StreamExt};

#[derive(Args, Debug)]
pub struct WinratesArgs {
    /// Trailing window in days (defaults to the configured window)
    #[arg(long)]
    pub days: Option<u32>,

    /// Minimum closed trades for ranking eligibility
    #[arg(long)]
    pub min_trades: Option<usize>,

    /// Number of rows to display
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

impl WinratesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let roster = Roster::from_config(&config.roster)?;
        let client = InfoClient::new(&config.exchange);

        let days = self.days.unwrap_or(config.tracker.winrate_window_days);
        let min_trades = self.min_trades.unwrap_or(config.tracker.min_trades);
        let since = Utc::now() - chrono::Duration::days(i64::from(days));
        let instrument = config.exchange.instrument.as_str();

        println!(
            "Calculating whale winrates ({} days, min {} trades)...",
            days, min_trades
        );

        let client_ref = &client;
        let scores: Vec<PerformanceScore> = stream::iter(roster.accounts().to_vec())
            .map(|address| async move {
                match client_ref.fetch_fills(&address, since).await {
                    Ok(fills) => score::score(&address, &fills, instrument, days),
                    Err(e) => {
                        tracing::warn!(
                            address = %address,
                            error = %e,
                            "Fill fetch failed, scoring account as inactive"
                        );
                        score::score(&address, &[], instrument, days)
                    }
                }
            })
            .buffered(config.tracker.fetch_concurrency.max(1))
            .collect()
            .await;

        let ranked = score::rank_all(scores, min_trades);
        if ranked.is_empty() {
            println!("No whales met the minimum trade count");
            return Ok(());
        }

        println!();
        println!("TOP WHALES BY WINRATE ({})", instrument);
        for (i, score) in ranked.iter().take(self.top).enumerate() {
            let winrate = match score.winrate_pct {
                Some(winrate) => format!("{:>5.1}%", winrate),
                None => "  N/A".to_string(),
            };
            let profit_factor = match &score.profit_factor {
                Some(pf) => pf.to_string(),
                None => "N/A".to_string(),
            };
            println!(
                "{:2}. {}: {} WR | {:4} trades | PF {} | ${:.0}",
                i + 1,
                short_address(&score.address),
                winrate,
                score.closed_trades,
                profit_factor,
                score.total_pnl
            );
        }

        Ok(())
    }
}
