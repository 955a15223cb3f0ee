//! Data access layer for habit snapshots.

mod snapshot;
mod store;

#[allow(unused_imports)]
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot, SnapshotError};
#[allow(unused_imports)]
pub use store::{current_streak, HabitStore, StreakSource};
