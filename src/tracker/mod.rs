//! Position tracking core
//!
//! Snapshots of whale positions, the change detector that diffs successive
//! polls, the store that persists snapshots between runs, and the monitor
//! that drives one full detection cycle.

mod detector;
mod monitor;
mod snapshot;
mod store;

pub use detector::{ChangeDetector, ChangeEvent, ChangeKind};
pub use monitor::{fetch_positions, CycleReport, Monitor};
pub use snapshot::{Direction, PositionSnapshot};
pub use store::SnapshotStore;
