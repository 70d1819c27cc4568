//! Performance scoring
//!
//! Win/loss statistics and profitability over a trailing window of fills.
//! Scoring is a pure function; eligibility filtering (minimum trade count)
//! belongs to callers, so a score is always produced, even an empty one.

use crate::exchange::Fill;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gross-profit to gross-loss ratio.
///
/// `Unbounded` stands in for the division-by-zero case (profitable with no
/// losing trades) so serialization and comparison stay well-defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitFactor {
    Finite(Decimal),
    Unbounded,
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(value) => write!(f, "{:.2}", value),
            ProfitFactor::Unbounded => write!(f, "inf"),
        }
    }
}

/// Trailing performance statistics for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub address: String,
    pub window_days: u32,
    /// Fills in the tracked instrument, whether or not they closed a lot
    pub fill_count: usize,
    /// Fills that realized profit or loss
    pub closed_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage of closed trades that won; `None` when nothing closed.
    /// "No closed trades" is not the same thing as a 0% winrate.
    pub winrate_pct: Option<Decimal>,
    pub total_pnl: Decimal,
    pub profit_factor: Option<ProfitFactor>,
}

impl PerformanceScore {
    /// Whether the account traded the instrument at all in the window
    pub fn has_activity(&self) -> bool {
        self.fill_count > 0
    }
}

/// Score one account's fills over the trailing window.
///
/// Fills are filtered to the target instrument; only fills with nonzero
/// `closed_pnl` enter the win/loss and PnL aggregation.
pub fn score(address: &str, fills: &[Fill], instrument: &str, window_days: u32) -> PerformanceScore {
    let instrument_fills: Vec<&Fill> = fills
        .iter()
        .filter(|f| f.instrument == instrument)
        .collect();

    let closed: Vec<&Fill> = instrument_fills
        .iter()
        .copied()
        .filter(|f| !f.closed_pnl.is_zero())
        .collect();

    if closed.is_empty() {
        return PerformanceScore {
            address: address.to_string(),
            window_days,
            fill_count: instrument_fills.len(),
            closed_trades: 0,
            wins: 0,
            losses: 0,
            winrate_pct: None,
            total_pnl: Decimal::ZERO,
            profit_factor: None,
        };
    }

    let wins = closed.iter().filter(|f| f.closed_pnl > Decimal::ZERO).count();
    let losses = closed.iter().filter(|f| f.closed_pnl < Decimal::ZERO).count();
    let total_pnl: Decimal = closed.iter().map(|f| f.closed_pnl).sum();

    let winrate_pct =
        (Decimal::from(wins) / Decimal::from(wins + losses) * dec!(100)).round_dp(1);

    let gross_profit: Decimal = closed
        .iter()
        .filter(|f| f.closed_pnl > Decimal::ZERO)
        .map(|f| f.closed_pnl)
        .sum();
    let gross_loss: Decimal = closed
        .iter()
        .filter(|f| f.closed_pnl < Decimal::ZERO)
        .map(|f| f.closed_pnl)
        .sum::<Decimal>()
        .abs();

    let profit_factor = if gross_loss > Decimal::ZERO {
        ProfitFactor::Finite((gross_profit / gross_loss).round_dp(2))
    } else {
        ProfitFactor::Unbounded
    };

    PerformanceScore {
        address: address.to_string(),
        window_days,
        fill_count: instrument_fills.len(),
        closed_trades: closed.len(),
        wins,
        losses,
        winrate_pct: Some(winrate_pct),
        total_pnl,
        profit_factor: Some(profit_factor),
    }
}

/// Rank scores by winrate, descending.
///
/// Only accounts with at least `min_trades` closed trades are retained. The
/// sort is stable, so equal winrates keep their original roster order.
pub fn rank_all(scores: Vec<PerformanceScore>, min_trades: usize) -> Vec<PerformanceScore> {
    let mut eligible: Vec<PerformanceScore> = scores
        .into_iter()
        .filter(|s| s.closed_trades >= min_trades)
        .collect();

    eligible.sort_by(|a, b| {
        let a_key = a.winrate_pct.unwrap_or(Decimal::ZERO);
        let b_key = b.winrate_pct.unwrap_or(Decimal::ZERO);
        b_key.cmp(&a_key)
    });

    eligible
}
