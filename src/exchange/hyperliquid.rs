//! Hyperliquid info endpoint client
//!
//! All queries go through a single POST endpoint with a `type`-tagged JSON
//! body. Numeric fields arrive as strings on the wire.

use super::{ClientError, Fill, MarketDataClient};
use crate::config::ExchangeConfig;
use crate::tracker::PositionSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hyperliquid info API URL
pub const HYPERLIQUID_INFO_URL: &str = "https://api.hyperliquid.xyz/info";

/// Client for the Hyperliquid info endpoint
pub struct InfoClient {
    base_url: String,
    instrument: String,
    client: Client,
}

impl InfoClient {
    /// Create a new client from exchange configuration
    pub fn new(config: &ExchangeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.clone(),
            instrument: config.instrument.clone(),
            client,
        }
    }

    async fn post<T: DeserializeOwned>(&self, body: &InfoRequest<'_>) -> Result<T, ClientError> {
        let response = self.client.post(&self.base_url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarketDataClient for InfoClient {
    async fn fetch_position(
        &self,
        address: &str,
    ) -> Result<Option<PositionSnapshot>, ClientError> {
        tracing::debug!(address = %address, "Fetching clearinghouse state");

        let state: ClearinghouseState = self
            .post(&InfoRequest::ClearinghouseState { user: address })
            .await?;

        Ok(position_from_state(address, state, &self.instrument))
    }

    async fn fetch_fills(
        &self,
        address: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Fill>, ClientError> {
        tracing::debug!(address = %address, since = %since, "Fetching fills");

        let fills: Vec<RawFill> = self
            .post(&InfoRequest::UserFillsByTime {
                user: address,
                start_time: since.timestamp_millis(),
                aggregate_by_time: false,
            })
            .await?;

        Ok(fills.into_iter().map(Fill::from).collect())
    }
}

/// Request body for the info endpoint
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum InfoRequest<'a> {
    #[serde(rename_all = "camelCase")]
    ClearinghouseState { user: &'a str },
    #[serde(rename_all = "camelCase")]
    UserFillsByTime {
        user: &'a str,
        start_time: i64,
        aggregate_by_time: bool,
    },
}

/// Clearinghouse state response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearinghouseState {
    #[serde(default)]
    margin_summary: MarginSummary,
    #[serde(default)]
    asset_positions: Vec<AssetPosition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarginSummary {
    #[serde(default)]
    account_value: Decimal,
}

#[derive(Debug, Deserialize)]
struct AssetPosition {
    position: RawPosition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPosition {
    coin: String,
    szi: Decimal,
    #[serde(default)]
    entry_px: Option<Decimal>,
    #[serde(default)]
    leverage: Option<RawLeverage>,
    #[serde(default)]
    unrealized_pnl: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawLeverage {
    #[serde(default)]
    value: Decimal,
}

/// Fill as returned by `userFillsByTime`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFill {
    coin: String,
    #[serde(default)]
    closed_pnl: Decimal,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    time: DateTime<Utc>,
}

impl From<RawFill> for Fill {
    fn from(raw: RawFill) -> Self {
        Self {
            instrument: raw.coin,
            closed_pnl: raw.closed_pnl,
            time: raw.time,
        }
    }
}

/// Extract the tracked-instrument position, if any, from a state response.
///
/// A zero-size entry means flat and yields `None`; flat positions are never
/// represented as snapshots.
fn position_from_state(
    address: &str,
    state: ClearinghouseState,
    instrument: &str,
) -> Option<PositionSnapshot> {
    let account_value = state.margin_summary.account_value;

    for entry in state.asset_positions {
        let raw = entry.position;
        if raw.coin != instrument {
            continue;
        }
        if raw.szi.is_zero() {
            continue;
        }

        return Some(PositionSnapshot {
            address: address.to_string(),
            signed_size: raw.szi,
            entry_price: raw.entry_px.unwrap_or_default(),
            leverage: raw.leverage.map(|l| l.value).unwrap_or(Decimal::ONE),
            account_value,
            unrealized_pnl: raw.unrealized_pnl,
        });
    }

    None
}
