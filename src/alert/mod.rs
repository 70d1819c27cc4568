//! Alert formatting and delivery
//!
//! The tracking core hands a list of change events to this module; transport
//! details stay behind the `Notifier` trait. Delivery failures are counted
//! and logged, never retried within a cycle, never fatal.

pub mod format;
mod telegram;

pub use telegram::{TelegramNotifier, TELEGRAM_API_URL};

use crate::tracker::ChangeEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Notification transport errors
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Transport-level failure
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response from the Bot API
    #[error("telegram API returned {0}")]
    Status(reqwest::StatusCode),
}

/// Trait for alert delivery implementations
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one rendered alert message
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Per-cycle delivery counts
#[derive(Debug, Default, Clone, Copy)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Render and deliver every event, counting successes and failures
pub async fn deliver_all(
    notifier: &dyn Notifier,
    events: &[ChangeEvent],
    instrument: &str,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for event in events {
        let message = format::render(event, instrument);
        tracing::info!(
            kind = event.kind.name(),
            address = %event.address,
            "Sending alert"
        );

        match notifier.deliver(&message).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    address = %event.address,
                    error = %e,
                    "Alert delivery failed"
                );
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{ChangeKind, Direction};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyNotifier {
        calls: AtomicUsize,
        fail_every_other: bool,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn deliver(&self, _text: &str) -> Result<(), DeliveryError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_every_other && call % 2 == 1 {
                return Err(DeliveryError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            Ok(())
        }
    }

    fn event(address: &str) -> ChangeEvent {
        ChangeEvent {
            address: address.to_string(),
            kind: ChangeKind::NewPosition {
                direction: Direction::Long,
                size: dec!(1.5),
                entry_price: dec!(95000),
                leverage: dec!(10),
                account_value: dec!(100000),
            },
            score: None,
        }
    }

    #[tokio::test]
    async fn test_deliver_all_counts_successes() {
        let notifier = FlakyNotifier {
            calls: AtomicUsize::new(0),
            fail_every_other: false,
        };
        let events = vec![event("0xaa"), event("0xbb")];

        let report = deliver_all(&notifier, &events, "BTC").await;
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_deliver_all_continues_past_failures() {
        let notifier = FlakyNotifier {
            calls: AtomicUsize::new(0),
            fail_every_other: true,
        };
        let events = vec![event("0xaa"), event("0xbb"), event("0xcc")];

        let report = deliver_all(&notifier, &events, "BTC").await;
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_deliver_all_empty() {
        let notifier = FlakyNotifier {
            calls: AtomicUsize::new(0),
            fail_every_other: false,
        };

        let report = deliver_all(&notifier, &[], "BTC").await;
        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 0);
    }
}
