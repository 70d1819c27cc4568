//! Position snapshot types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Derive direction from a signed position size
    pub fn from_size(size: Decimal) -> Self {
        if size > Decimal::ZERO {
            Direction::Long
        } else {
            Direction::Short
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// One account's open position in the tracked instrument at one poll.
///
/// A snapshot always has nonzero size: flat accounts are represented by the
/// absence of a map entry, never by a zero-size snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub address: String,
    /// Signed size; the sign encodes direction
    pub signed_size: Decimal,
    pub entry_price: Decimal,
    pub leverage: Decimal,
    /// Total account value, zero when unavailable
    pub account_value: Decimal,
    pub unrealized_pnl: Decimal,
}

impl PositionSnapshot {
    pub fn direction(&self) -> Direction {
        Direction::from_size(self.signed_size)
    }

    pub fn abs_size(&self) -> Decimal {
        self.signed_size.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot(size: Decimal) -> PositionSnapshot {
        PositionSnapshot {
            address: "0xaa".to_string(),
            signed_size: size,
            entry_price: dec!(95000),
            leverage: dec!(10),
            account_value: dec!(1000000),
            unrealized_pnl: dec!(0),
        }
    }

    #[test]
    fn test_direction_from_size() {
        assert_eq!(Direction::from_size(dec!(1.5)), Direction::Long);
        assert_eq!(Direction::from_size(dec!(-0.1)), Direction::Short);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Long.to_string(), "LONG");
        assert_eq!(Direction::Short.to_string(), "SHORT");
    }

    #[test]
    fn test_snapshot_helpers() {
        let long = snapshot(dec!(2.5));
        assert_eq!(long.direction(), Direction::Long);
        assert_eq!(long.abs_size(), dec!(2.5));

        let short = snapshot(dec!(-2.5));
        assert_eq!(short.direction(), Direction::Short);
        assert_eq!(short.abs_size(), dec!(2.5));
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let original = snapshot(dec!(-1.25));
        let json = serde_json::to_string(&original).unwrap();
        let restored: PositionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
