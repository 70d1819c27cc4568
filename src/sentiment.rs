//! Roster-wide sentiment aggregation
//!
//! Reduces the current snapshot map into a single long/short bias label.
//! Accounts contribute their absolute size independently.

use crate::tracker::{Direction, PositionSnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Aggregate directional bias across the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    StrongLong,
    SlightlyLong,
    Neutral,
    SlightlyShort,
    StrongShort,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentLabel::StrongLong => "STRONG_LONG",
            SentimentLabel::SlightlyLong => "SLIGHTLY_LONG",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::SlightlyShort => "SLIGHTLY_SHORT",
            SentimentLabel::StrongShort => "STRONG_SHORT",
        };
        write!(f, "{}", name)
    }
}

/// Sentiment across all tracked accounts with open positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub whale_count: usize,
    pub total_long: Decimal,
    pub total_short: Decimal,
    pub long_ratio_pct: Decimal,
    pub label: SentimentLabel,
}

/// Aggregate current snapshots into a sentiment summary.
///
/// With no open positions at all the ratio is defined as 50 (neutral).
pub fn aggregate(snapshots: &HashMap<String, PositionSnapshot>) -> SentimentSummary {
    let mut total_long = Decimal::ZERO;
    let mut total_short = Decimal::ZERO;

    for snapshot in snapshots.values() {
        match snapshot.direction() {
            Direction::Long => total_long += snapshot.abs_size(),
            Direction::Short => total_short += snapshot.abs_size(),
        }
    }

    let total = total_long + total_short;
    let long_ratio = if total > Decimal::ZERO {
        total_long / total * dec!(100)
    } else {
        dec!(50)
    };

    SentimentSummary {
        whale_count: snapshots.len(),
        total_long,
        total_short,
        long_ratio_pct: long_ratio.round_dp(1),
        label: label_for(long_ratio),
    }
}

fn label_for(long_ratio_pct: Decimal) -> SentimentLabel {
    if long_ratio_pct > dec!(65) {
        SentimentLabel::StrongLong
    } else if long_ratio_pct > dec!(55) {
        SentimentLabel::SlightlyLong
    } else if long_ratio_pct < dec!(35) {
        SentimentLabel::StrongShort
    } else if long_ratio_pct < dec!(45) {
        SentimentLabel::SlightlyShort
    } else {
        SentimentLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshots(sizes: &[Decimal]) -> HashMap<String, PositionSnapshot> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let address = format!("0x{:02}", i);
                (
                    address.clone(),
                    PositionSnapshot {
                        address,
                        signed_size: *size,
                        entry_price: dec!(95000),
                        leverage: dec!(10),
                        account_value: dec!(0),
                        unrealized_pnl: dec!(0),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_strong_long() {
        let summary = aggregate(&snapshots(&[dec!(70), dec!(-30)]));
        assert_eq!(summary.whale_count, 2);
        assert_eq!(summary.total_long, dec!(70));
        assert_eq!(summary.total_short, dec!(30));
        assert_eq!(summary.long_ratio_pct, dec!(70.0));
        assert_eq!(summary.label, SentimentLabel::StrongLong);
    }

    #[test]
    fn test_no_positions_is_neutral() {
        let summary = aggregate(&HashMap::new());
        assert_eq!(summary.whale_count, 0);
        assert_eq!(summary.long_ratio_pct, dec!(50));
        assert_eq!(summary.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_strong_short() {
        let summary = aggregate(&snapshots(&[dec!(10), dec!(-90)]));
        assert_eq!(summary.long_ratio_pct, dec!(10.0));
        assert_eq!(summary.label, SentimentLabel::StrongShort);
    }

    #[test]
    fn test_slightly_long() {
        let summary = aggregate(&snapshots(&[dec!(60), dec!(-40)]));
        assert_eq!(summary.label, SentimentLabel::SlightlyLong);
    }

    #[test]
    fn test_slightly_short() {
        let summary = aggregate(&snapshots(&[dec!(40), dec!(-60)]));
        assert_eq!(summary.label, SentimentLabel::SlightlyShort);
    }

    #[test]
    fn test_label_boundaries_are_exclusive() {
        // Exactly 65 is not strong, exactly 55 is not slightly long,
        // exactly 45 and 35 stay on the neutral side of their fences
        assert_eq!(label_for(dec!(65)), SentimentLabel::SlightlyLong);
        assert_eq!(label_for(dec!(55)), SentimentLabel::Neutral);
        assert_eq!(label_for(dec!(45)), SentimentLabel::Neutral);
        assert_eq!(label_for(dec!(35)), SentimentLabel::SlightlyShort);
    }

    #[test]
    fn test_all_long() {
        let summary = aggregate(&snapshots(&[dec!(5), dec!(3)]));
        assert_eq!(summary.long_ratio_pct, dec!(100.0));
        assert_eq!(summary.label, SentimentLabel::StrongLong);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SentimentLabel::StrongLong.to_string(), "STRONG_LONG");
        assert_eq!(SentimentLabel::Neutral.to_string(), "NEUTRAL");
    }
}
