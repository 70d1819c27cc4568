//! Detection cycle driver
//!
//! One monitor invocation is one full roster sweep: load previous snapshots,
//! poll every account, classify changes, attach scores, replace the store.
//! Nothing in the cycle is fatal; failed fetches degrade to "no data for this
//! account this cycle" and the sweep continues.

use super::detector::{ChangeDetector, ChangeEvent};
use super::snapshot::PositionSnapshot;
use super::store::SnapshotStore;
use crate::config::TrackerConfig;
use crate::exchange::MarketDataClient;
use crate::roster::Roster;
use crate::score;
use chrono::{Duration, Utc};
use futures_util::{stream, StreamExt};
use std::collections::HashMap;

/// Outcome of one detection cycle
#[derive(Debug)]
pub struct CycleReport {
    /// Significant changes, in roster order
    pub events: Vec<ChangeEvent>,
    pub roster_size: usize,
    /// Accounts holding an open position this cycle
    pub open_positions: usize,
    /// Accounts whose fetch failed and were treated as flat this cycle
    pub degraded_accounts: usize,
}

/// Fetch current positions for the whole roster with bounded concurrency.
///
/// `buffered` yields results in roster order, so the assembled map and the
/// degraded count are independent of fetch completion order.
pub async fn fetch_positions<C: MarketDataClient>(
    client: &C,
    roster: &Roster,
    concurrency: usize,
) -> (HashMap<String, PositionSnapshot>, usize) {
    let results: Vec<_> = stream::iter(roster.accounts().to_vec())
        .map(|address| async move {
            let result = client.fetch_position(&address).await;
            (address, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut current = HashMap::new();
    let mut degraded = 0;

    for (address, result) in results {
        match result {
            Ok(Some(snapshot)) => {
                current.insert(address, snapshot);
            }
            Ok(None) => {}
            Err(e) => {
                degraded += 1;
                tracing::warn!(
                    address = %address,
                    error = %e,
                    "Position fetch failed, treating account as flat this cycle"
                );
            }
        }
    }

    (current, degraded)
}

/// Drives detection cycles against a market data client
pub struct Monitor<C> {
    client: C,
    roster: Roster,
    store: SnapshotStore,
    detector: ChangeDetector,
    instrument: String,
    window_days: u32,
    fetch_concurrency: usize,
}

impl<C: MarketDataClient> Monitor<C> {
    pub fn new(
        client: C,
        roster: Roster,
        store: SnapshotStore,
        config: &TrackerConfig,
        instrument: String,
    ) -> Self {
        Self {
            client,
            roster,
            store,
            detector: ChangeDetector::new(config.size_increase_threshold_pct),
            instrument,
            window_days: config.winrate_window_days,
            fetch_concurrency: config.fetch_concurrency,
        }
    }

    /// Run one full detection cycle.
    ///
    /// The store ends up holding exactly this cycle's open positions,
    /// whether or not any events fired.
    pub async fn run_cycle(&self) -> CycleReport {
        let previous = self.store.load();
        tracing::info!(whales = self.roster.len(), "Checking whale positions");

        let (current, degraded_accounts) =
            fetch_positions(&self.client, &self.roster, self.fetch_concurrency).await;

        let mut events = self
            .detector
            .detect(self.roster.accounts(), &current, &previous);

        for event in &mut events {
            self.attach_score(event).await;
        }

        if let Err(e) = self.store.save(&current) {
            tracing::error!(error = %e, "Could not save position snapshots");
        }

        tracing::info!(
            changes = events.len(),
            open = current.len(),
            degraded = degraded_accounts,
            "Detection cycle complete"
        );

        CycleReport {
            events,
            roster_size: self.roster.len(),
            open_positions: current.len(),
            degraded_accounts,
        }
    }

    async fn attach_score(&self, event: &mut ChangeEvent) {
        let since = Utc::now() - Duration::days(i64::from(self.window_days));

        match self.client.fetch_fills(&event.address, since).await {
            Ok(fills) => {
                event.score = Some(score::score(
                    &event.address,
                    &fills,
                    &self.instrument,
                    self.window_days,
                ));
            }
            Err(e) => {
                tracing::warn!(
                    address = %event.address,
                    error = %e,
                    "Could not fetch fills, alert will carry no score"
                );
            }
        }
    }
}
