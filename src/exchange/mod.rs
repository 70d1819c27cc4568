//! Upstream market data access
//!
//! Narrow interface over the exchange info endpoint: one account's current
//! position and its historical fills. Failures here are transient by design;
//! callers degrade to "no data for this account this cycle" and continue.

mod hyperliquid;

pub use hyperliquid::{InfoClient, HYPERLIQUID_INFO_URL};

use crate::tracker::PositionSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upstream data source errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or malformed response payload
    #[error("info request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response from the info endpoint
    #[error("info endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// One historical trade execution for an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Instrument symbol the fill executed in
    pub instrument: String,
    /// Realized PnL; zero when the fill opened or added to a position
    pub closed_pnl: Decimal,
    /// Execution time
    pub time: DateTime<Utc>,
}

/// Trait for market data client implementations
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetch the account's current position in the tracked instrument.
    ///
    /// `Ok(None)` means the account is flat: no entry, or zero size.
    async fn fetch_position(
        &self,
        address: &str,
    ) -> Result<Option<PositionSnapshot>, ClientError>;

    /// Fetch the account's fills since the given time, across all instruments
    async fn fetch_fills(
        &self,
        address: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Fill>, ClientError>;
}
