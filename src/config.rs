//! Configuration types for whale-watch

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub roster: RosterConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Whale roster source: inline addresses and/or an external file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// Inline account addresses
    #[serde(default)]
    pub accounts: Vec<String>,

    /// Roster file with one address per line, `#` starts a comment
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Upstream info-endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Base URL of the info endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tracked instrument symbol
    #[serde(default = "default_instrument")]
    pub instrument: String,
}

fn default_base_url() -> String {
    crate::exchange::HYPERLIQUID_INFO_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_instrument() -> String {
    "BTC".to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 15,
            instrument: default_instrument(),
        }
    }
}

/// Detection cycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Where the previous-cycle snapshots are persisted
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Size growth (percent) above which an increase becomes an event
    #[serde(default = "default_size_increase_threshold")]
    pub size_increase_threshold_pct: Decimal,

    /// Trailing window for winrate scoring (days)
    #[serde(default = "default_winrate_window_days")]
    pub winrate_window_days: u32,

    /// Minimum closed trades for ranking eligibility
    #[serde(default = "default_min_trades")]
    pub min_trades: usize,

    /// Concurrent upstream fetches per sweep
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("previous_positions.json")
}
fn default_size_increase_threshold() -> Decimal {
    Decimal::from(50)
}
fn default_winrate_window_days() -> u32 {
    30
}
fn default_min_trades() -> usize {
    5
}
fn default_fetch_concurrency() -> usize {
    4
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            size_increase_threshold_pct: default_size_increase_threshold(),
            winrate_window_days: 30,
            min_trades: 5,
            fetch_concurrency: 4,
        }
    }
}

/// Telegram delivery configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    /// Bot token; falls back to the TELEGRAM_BOT_TOKEN env var
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Target chat; falls back to the TELEGRAM_CHAT_ID env var
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl TelegramConfig {
    /// Resolve credentials from config or environment
    pub fn credentials(&self) -> Option<(String, String)> {
        let token = self
            .bot_token
            .clone()
            .or_else(|| std::env::var("TELEGRAM_BOT_TOKEN").ok())?;
        let chat_id = self
            .chat_id
            .clone()
            .or_else(|| std::env::var("TELEGRAM_CHAT_ID").ok())?;
        Some((token, chat_id))
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
