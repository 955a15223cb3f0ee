//! Snapshot loader for habit data files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{Completion, Habit, DEFAULT_HABIT_COLOR};


/// Errors raised while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}


/// Validated habits and completions, in file order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub completions: Vec<Completion>,
}


#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    habits: Vec<Habit>,
    #[serde(default)]
    completions: Vec<RawCompletion>,
}


#[derive(Debug, Deserialize)]
struct RawCompletion {
    habit_id: String,
    completed_date: String,
}


fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid color regex"))
}


/// Load and validate a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "loaded snapshot file");
    parse_snapshot(&content)
}


/// Parse and validate snapshot JSON.
///
/// Completions with an unparsable date are skipped. Out-of-range weekday
/// indices and invalid colors are corrected in place.
pub fn parse_snapshot(content: &str) -> Result<Snapshot, SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(content)?;

    let habits = raw.habits.into_iter().map(sanitize_habit).collect();

    let mut completions = Vec::with_capacity(raw.completions.len());
    for (index, record) in raw.completions.into_iter().enumerate() {
        match NaiveDate::parse_from_str(record.completed_date.trim(), "%Y-%m-%d") {
            Ok(date) => completions.push(Completion::new(record.habit_id, date)),
            Err(e) => {
                warn!(
                    index,
                    habit_id = %record.habit_id,
                    date = %record.completed_date,
                    "skipping completion with malformed date: {e}"
                );
            }
        }
    }

    Ok(Snapshot { habits, completions })
}


fn sanitize_habit(mut habit: Habit) -> Habit {
    let days: BTreeSet<u8> = habit
        .active_days
        .iter()
        .copied()
        .filter(|&day| {
            let valid = day <= 6;
            if !valid {
                warn!(habit_id = %habit.id, day, "dropping out-of-range active day");
            }
            valid
        })
        .collect();
    habit.active_days = days.into_iter().collect();

    if !color_pattern().is_match(&habit.color) {
        warn!(habit_id = %habit.id, color = %habit.color, "invalid color, using default");
        habit.color = DEFAULT_HABIT_COLOR.to_string();
    }

    habit
}
