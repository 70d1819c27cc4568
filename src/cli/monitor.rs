//! Monitor command implementation

use crate::alert::{self, format, TelegramNotifier};
use crate::config::Config;
use crate::exchange::InfoClient;
use crate::roster::Roster;
use crate::tracker::{Monitor, SnapshotStore};
use clap::Args;

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Skip Telegram delivery, print alerts to the console only
    #[arg(long)]
    pub no_notify: bool,
}

impl MonitorArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let roster = Roster::from_config(&config.roster)?;
        let client = InfoClient::new(&config.exchange);
        let store = SnapshotStore::new(&config.tracker.snapshot_path);
        let instrument = config.exchange.instrument.clone();

        let monitor = Monitor::new(client, roster, store, &config.tracker, instrument.clone());
        let report = monitor.run_cycle().await;

        println!("Tracked whales: {}", report.roster_size);
        println!("Open positions: {}", report.open_positions);
        println!("Changes detected: {}", report.events.len());
        if report.degraded_accounts > 0 {
            println!(
                "Degraded accounts: {} (treated as flat this cycle)",
                report.degraded_accounts
            );
        }

        if report.events.is_empty() {
            println!("No position changes detected");
            return Ok(());
        }

        for event in &report.events {
            println!("  {}", format::render_plain(event, &instrument));
        }

        if self.no_notify {
            return Ok(());
        }

        match TelegramNotifier::from_config(&config.telegram) {
            Some(notifier) => {
                let delivery = alert::deliver_all(&notifier, &report.events, &instrument).await;
                println!(
                    "Alerts sent: {}/{}",
                    delivery.delivered,
                    report.events.len()
                );
            }
            None => {
                tracing::warn!("Telegram is not configured, skipping delivery");
            }
        }

        Ok(())
    }
}
