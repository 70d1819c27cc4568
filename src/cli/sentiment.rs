//! Sentiment command implementation

use crate::config::Config;
use crate::exchange::InfoClient;
use crate::roster::Roster;
use crate::sentiment;
use crate::tracker::fetch_positions;
use clap::Args;

#[derive(Args, Debug)]
pub struct SentimentArgs {}

impl SentimentArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let roster = Roster::from_config(&config.roster)?;
        let client = InfoClient::new(&config.exchange);
        let instrument = &config.exchange.instrument;

        println!("Getting current sentiment...");
        let (snapshots, degraded) =
            fetch_positions(&client, &roster, config.tracker.fetch_concurrency).await;

        let summary = sentiment::aggregate(&snapshots);

        println!("Whales with open positions: {}", summary.whale_count);
        println!("Total LONG:  {:.2} {}", summary.total_long, instrument);
        println!("Total SHORT: {:.2} {}", summary.total_short, instrument);
        println!("Long ratio: {:.1}%", summary.long_ratio_pct);
        println!("Sentiment: {}", summary.label);
        if degraded > 0 {
            println!("({} accounts unavailable this cycle)", degraded);
        }

        Ok(())
    }
}
