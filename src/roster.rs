//! Whale roster loading
//!
//! The tracked-account list is static configuration data: an immutable,
//! ordered, deduplicated list of addresses loaded once at startup.

use crate::config::RosterConfig;
use std::collections::HashSet;

/// Ordered, deduplicated list of tracked account addresses
#[derive(Debug, Clone)]
pub struct Roster {
    accounts: Vec<String>,
}

impl Roster {
    /// Load the roster from configuration (inline list and/or file)
    pub fn from_config(config: &RosterConfig) -> anyhow::Result<Self> {
        let mut raw: Vec<String> = config.accounts.clone();

        if let Some(path) = &config.file {
            let content = std::fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!("Failed to read roster file {}: {}", path.display(), e)
            })?;
            raw.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(String::from),
            );
        }

        let mut seen = HashSet::new();
        let mut accounts = Vec::with_capacity(raw.len());
        for address in raw {
            let address = address.to_lowercase();
            if seen.insert(address.clone()) {
                accounts.push(address);
            } else {
                tracing::warn!(address = %address, "Duplicate roster entry ignored");
            }
        }

        if accounts.is_empty() {
            anyhow::bail!("Whale roster is empty; configure [roster] accounts or file");
        }

        tracing::debug!(count = accounts.len(), "Loaded whale roster");
        Ok(Self { accounts })
    }

    /// Tracked addresses in configured order
    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Shorten an address for display, keeping the leading characters
pub fn short_address(address: &str) -> String {
    match address.get(..10) {
        Some(prefix) => format!("{}...", prefix),
        None => address.to_string(),
    }
}
