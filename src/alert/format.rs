//! Alert message rendering

use crate::roster::short_address;
use crate::score::PerformanceScore;
use crate::tracker::{ChangeEvent, ChangeKind, Direction};
use rust_decimal::Decimal;

/// Render an event as a Telegram HTML message
pub fn render(event: &ChangeEvent, instrument: &str) -> String {
    let winrate = winrate_line(event.score.as_ref());

    match &event.kind {
        ChangeKind::NewPosition {
            direction,
            size,
            entry_price,
            leverage,
            account_value,
        } => format!(
            "🐋 <b>WHALE ALERT</b> {}\n\n\
             New {} position\n\
             📍 <code>{}</code>\n\
             📊 {} {:.2} {}\n\
             💰 Entry: ${:.0}\n\
             ⚡ Leverage: {:.0}x\n\
             💼 Account: ${:.0}\
             {}",
            direction_marker(*direction),
            instrument,
            short_address(&event.address),
            direction,
            size,
            instrument,
            entry_price,
            leverage,
            account_value,
            winrate
        ),

        ChangeKind::DirectionFlip {
            old_direction,
            new_direction,
            size,
            entry_price,
            leverage,
        } => format!(
            "🔄 <b>WHALE FLIP</b>\n\n\
             Direction change!\n\
             📍 <code>{}</code>\n\
             ❌ {} → ✅ {}\n\
             📊 Size: {:.2} {}\n\
             💰 Entry: ${:.0}\n\
             ⚡ Leverage: {:.0}x\
             {}",
            short_address(&event.address),
            old_direction,
            new_direction,
            size,
            instrument,
            entry_price,
            leverage,
            winrate
        ),

        ChangeKind::SizeIncrease {
            direction,
            old_size,
            new_size,
            increase_pct,
            leverage,
        } => format!(
            "📈 <b>WHALE ADDING</b> {}\n\n\
             Position increased!\n\
             📍 <code>{}</code>\n\
             📊 {:.2} → {:.2} {}\n\
             💹 +{:.0}%\n\
             ⚡ Leverage: {:.0}x\
             {}",
            direction_marker(*direction),
            short_address(&event.address),
            old_size,
            new_size,
            instrument,
            increase_pct,
            leverage,
            winrate
        ),
    }
}

/// One-line console rendition of an event
pub fn render_plain(event: &ChangeEvent, instrument: &str) -> String {
    let address = short_address(&event.address);

    match &event.kind {
        ChangeKind::NewPosition {
            direction,
            size,
            entry_price,
            ..
        } => format!(
            "NEW_POSITION {} {} {:.2} {} @ ${:.0}",
            address, direction, size, instrument, entry_price
        ),
        ChangeKind::DirectionFlip {
            old_direction,
            new_direction,
            size,
            ..
        } => format!(
            "DIRECTION_CHANGE {} {} -> {} {:.2} {}",
            address, old_direction, new_direction, size, instrument
        ),
        ChangeKind::SizeIncrease {
            old_size,
            new_size,
            increase_pct,
            ..
        } => format!(
            "SIZE_INCREASE {} {:.2} -> {:.2} {} (+{:.1}%)",
            address, old_size, new_size, instrument, increase_pct
        ),
    }
}

fn direction_marker(direction: Direction) -> &'static str {
    match direction {
        Direction::Long => "🟢",
        Direction::Short => "🔴",
    }
}

fn winrate_line(score: Option<&PerformanceScore>) -> String {
    match score {
        Some(score) => match score.winrate_pct {
            Some(winrate) => {
                let pnl_marker = if score.total_pnl > Decimal::ZERO {
                    "🟢"
                } else if score.total_pnl < Decimal::ZERO {
                    "🔴"
                } else {
                    "⚪"
                };
                format!(
                    "\n🏆 Winrate: {:.0}% ({} trades) {} ${:.0}",
                    winrate, score.closed_trades, pnl_marker, score.total_pnl
                )
            }
            None => "\n🏆 Winrate: N/A (no closed trades)".to_string(),
        },
        None => "\n🏆 Winrate: N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_position_event(score: Option<PerformanceScore>) -> ChangeEvent {
        ChangeEvent {
            address: "0xb83de012dba672c76a7dbbbf3e459cb59d7d6e36".to_string(),
            kind: ChangeKind::NewPosition {
                direction: Direction::Long,
                size: dec!(1.5),
                entry_price: dec!(95000),
                leverage: dec!(20),
                account_value: dec!(250000),
            },
            score,
        }
    }

    fn score_with_winrate(winrate: Option<Decimal>) -> PerformanceScore {
        PerformanceScore {
            address: "0xb83de012dba672c76a7dbbbf3e459cb59d7d6e36".to_string(),
            window_days: 30,
            fill_count: 12,
            closed_trades: 10,
            wins: 6,
            losses: 4,
            winrate_pct: winrate,
            total_pnl: dec!(1234),
            profit_factor: None,
        }
    }

    #[test]
    fn test_render_new_position() {
        let text = render(&new_position_event(None), "BTC");
        assert!(text.contains("WHALE ALERT"));
        assert!(text.contains("LONG 1.50 BTC"));
        assert!(text.contains("Entry: $95000"));
        assert!(text.contains("Leverage: 20x"));
        assert!(text.contains("0xb83de012..."));
    }

    #[test]
    fn test_missing_score_renders_not_available() {
        let text = render(&new_position_event(None), "BTC");
        assert!(text.contains("Winrate: N/A"));
    }

    #[test]
    fn test_undefined_winrate_is_not_zero() {
        let mut score = score_with_winrate(None);
        score.closed_trades = 0;
        let text = render(&new_position_event(Some(score)), "BTC");
        assert!(text.contains("Winrate: N/A (no closed trades)"));
        assert!(!text.contains("Winrate: 0%"));
    }

    #[test]
    fn test_winrate_line_with_score() {
        let text = render(&new_position_event(Some(score_with_winrate(Some(dec!(60.0))))), "BTC");
        assert!(text.contains("Winrate: 60% (10 trades)"));
        assert!(text.contains("$1234"));
    }

    #[test]
    fn test_render_direction_flip() {
        let event = ChangeEvent {
            address: "0xaa00000000".to_string(),
            kind: ChangeKind::DirectionFlip {
                old_direction: Direction::Long,
                new_direction: Direction::Short,
                size: dec!(2),
                entry_price: dec!(90000),
                leverage: dec!(5),
            },
            score: None,
        };

        let text = render(&event, "BTC");
        assert!(text.contains("WHALE FLIP"));
        assert!(text.contains("LONG"));
        assert!(text.contains("SHORT"));
    }

    #[test]
    fn test_render_size_increase() {
        let event = ChangeEvent {
            address: "0xaa00000000".to_string(),
            kind: ChangeKind::SizeIncrease {
                direction: Direction::Short,
                old_size: dec!(1),
                new_size: dec!(2.5),
                increase_pct: dec!(150.0),
                leverage: dec!(10),
            },
            score: None,
        };

        let text = render(&event, "BTC");
        assert!(text.contains("WHALE ADDING"));
        assert!(text.contains("+150%"));
    }

    #[test]
    fn test_render_plain_lines() {
        let text = render_plain(&new_position_event(None), "BTC");
        assert_eq!(text, "NEW_POSITION 0xb83de012... LONG 1.50 BTC @ $95000");
    }
}
