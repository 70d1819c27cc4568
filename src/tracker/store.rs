//! Snapshot persistence
//!
//! A flat JSON file keyed by account address, replaced wholesale once per
//! detection cycle. Replacement (not merge) keeps accounts that went flat
//! from lingering in persisted state.

use super::snapshot::PositionSnapshot;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Persists the last-known position per account across runs
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the previous cycle's snapshots.
    ///
    /// A missing file means first run and yields an empty map; an unreadable
    /// or malformed file is logged and also yields an empty map.
    pub fn load(&self) -> HashMap<String, PositionSnapshot> {
        if !self.path.exists() {
            return HashMap::new();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(snapshots) => snapshots,
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Snapshot file is malformed, starting from empty state"
                    );
                    HashMap::new()
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not read snapshot file, starting from empty state"
                );
                HashMap::new()
            }
        }
    }

    /// Replace the stored snapshots with this cycle's map.
    ///
    /// Writes to a temp file and renames it over the target, so readers see
    /// either the old state or the new one, never a partial write.
    pub fn save(&self, snapshots: &HashMap<String, PositionSnapshot>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshots)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            count = snapshots.len(),
            "Saved position snapshots"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn snapshot(address: &str, size: rust_decimal::Decimal) -> PositionSnapshot {
        PositionSnapshot {
            address: address.to_string(),
            signed_size: size,
            entry_price: dec!(95000),
            leverage: dec!(10),
            account_value: dec!(100000),
            unrealized_pnl: dec!(-42.5),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("positions.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("positions.json"));

        let mut snapshots = HashMap::new();
        snapshots.insert("0xaa".to_string(), snapshot("0xaa", dec!(1.5)));
        snapshots.insert("0xbb".to_string(), snapshot("0xbb", dec!(-0.25)));

        store.save(&snapshots).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, snapshots);
    }

    #[test]
    fn test_save_is_a_full_replace() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("positions.json"));

        let mut first = HashMap::new();
        first.insert("0xaa".to_string(), snapshot("0xaa", dec!(1)));
        first.insert("0xbb".to_string(), snapshot("0xbb", dec!(2)));
        store.save(&first).unwrap();

        let mut second = HashMap::new();
        second.insert("0xbb".to_string(), snapshot("0xbb", dec!(3)));
        store.save(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded.contains_key("0xaa"));
        assert_eq!(loaded["0xbb"].signed_size, dec!(3));
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("positions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SnapshotStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("positions.json");
        let store = SnapshotStore::new(&path);

        store.save(&HashMap::new()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state/nested/positions.json");
        let store = SnapshotStore::new(&path);

        store.save(&HashMap::new()).unwrap();
        assert!(path.exists());
    }
}
