//! CLI command implementations.

pub mod export;
pub mod heatmap;
pub mod progress;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::data::HabitStore;


/// Open the habit snapshot shared by every command.
fn open_store(data_path: &Path, today: NaiveDate) -> Result<HabitStore> {
    if !data_path.exists() {
        anyhow::bail!(
            "No habit data found at {}. Pass --data or set HBT_DATA.",
            data_path.display()
        );
    }

    let store = HabitStore::open(data_path, today)
        .with_context(|| format!("Failed to load habits from {}", data_path.display()))?;

    debug!(
        habits = store.habits().len(),
        completions = store.completions().len(),
        %today,
        "opened habit store"
    );
    Ok(store)
}
