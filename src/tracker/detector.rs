//! Position change detection
//!
//! Diffs two snapshot maps into a list of significant events. Each account is
//! classified by an ordered rule chain; the first matching rule wins, so an
//! account produces at most one event per cycle.

use super::snapshot::{Direction, PositionSnapshot};
use crate::score::PerformanceScore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A significant position change for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub address: String,
    #[serde(flatten)]
    pub kind: ChangeKind,
    /// Trailing performance score, attached after classification
    pub score: Option<PerformanceScore>,
}

/// Classified position change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    /// Account was flat last cycle and holds a position now
    NewPosition {
        direction: Direction,
        size: Decimal,
        entry_price: Decimal,
        leverage: Decimal,
        account_value: Decimal,
    },
    /// Direction reversed between cycles
    #[serde(rename = "DIRECTION_CHANGE")]
    DirectionFlip {
        old_direction: Direction,
        new_direction: Direction,
        size: Decimal,
        entry_price: Decimal,
        leverage: Decimal,
    },
    /// Same direction, size grew past the threshold
    SizeIncrease {
        direction: Direction,
        old_size: Decimal,
        new_size: Decimal,
        increase_pct: Decimal,
        leverage: Decimal,
    },
}

impl ChangeKind {
    /// Wire-format name of this event kind
    pub fn name(&self) -> &'static str {
        match self {
            ChangeKind::NewPosition { .. } => "NEW_POSITION",
            ChangeKind::DirectionFlip { .. } => "DIRECTION_CHANGE",
            ChangeKind::SizeIncrease { .. } => "SIZE_INCREASE",
        }
    }
}

/// Detects significant position changes between successive polls
pub struct ChangeDetector {
    size_increase_threshold_pct: Decimal,
}

impl ChangeDetector {
    /// Create a detector with the given size-increase threshold (percent)
    pub fn new(size_increase_threshold_pct: Decimal) -> Self {
        Self {
            size_increase_threshold_pct,
        }
    }

    /// Classify every roster account against the previous cycle.
    ///
    /// Pure function of its inputs; events come out in roster order.
    pub fn detect(
        &self,
        roster: &[String],
        current: &HashMap<String, PositionSnapshot>,
        previous: &HashMap<String, PositionSnapshot>,
    ) -> Vec<ChangeEvent> {
        let mut events = Vec::new();

        for address in roster {
            if let Some(kind) = self.classify(previous.get(address), current.get(address)) {
                events.push(ChangeEvent {
                    address: address.clone(),
                    kind,
                    score: None,
                });
            }
        }

        events
    }

    fn classify(
        &self,
        previous: Option<&PositionSnapshot>,
        current: Option<&PositionSnapshot>,
    ) -> Option<ChangeKind> {
        match (previous, current) {
            // Flat before, position now
            (None, Some(curr)) => Some(ChangeKind::NewPosition {
                direction: curr.direction(),
                size: curr.abs_size(),
                entry_price: curr.entry_price,
                leverage: curr.leverage,
                account_value: curr.account_value,
            }),

            // A flip outranks any size change
            (Some(prev), Some(curr)) if prev.direction() != curr.direction() => {
                Some(ChangeKind::DirectionFlip {
                    old_direction: prev.direction(),
                    new_direction: curr.direction(),
                    size: curr.abs_size(),
                    entry_price: curr.entry_price,
                    leverage: curr.leverage,
                })
            }

            (Some(prev), Some(curr)) => {
                let old_size = prev.abs_size();
                let new_size = curr.abs_size();
                // Stored snapshots always have nonzero size
                if old_size.is_zero() {
                    return None;
                }

                let growth_pct = (new_size - old_size) / old_size * dec!(100);
                if growth_pct > self.size_increase_threshold_pct {
                    Some(ChangeKind::SizeIncrease {
                        direction: curr.direction(),
                        old_size,
                        new_size,
                        increase_pct: growth_pct.round_dp(1),
                        leverage: curr.leverage,
                    })
                } else {
                    None
                }
            }

            // Position closed or still flat: not alertable
            _ => None,
        }
    }
}
