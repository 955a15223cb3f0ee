//! Application settings and path constants.

use std::path::PathBuf;


/// Rolling window for completion rates (days, today included).
pub const COMPLETION_WINDOW_DAYS: u32 = 30;

/// Days shown in the activity strip.
pub const ACTIVITY_DAYS: u32 = 30;

/// Days shown in the heatmap.
pub const HEATMAP_DAYS: u32 = 90;

/// Weekly chart dimensions.
pub const WEEKLY_BUCKETS: u32 = 12;
pub const DAYS_PER_WEEK: u32 = 7;

/// Streak length that fills the streak progress ring.
pub const STREAK_TARGET_DAYS: u32 = 30;

/// Default export date range length (days before today).
pub const DEFAULT_EXPORT_RANGE_DAYS: u64 = 30;

/// Export file names.
pub const JSON_EXPORT_FILENAME: &str = "habit-tracker-data.json";
pub const CSV_EXPORT_FILENAME: &str = "habit-tracker-data.csv";


/// Get the application's data directory.
pub fn get_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".habit-pulse")
}


/// Get the default snapshot path.
pub fn get_data_path() -> PathBuf {
    get_app_dir().join("habits.json")
}


/// Get the default export directory.
pub fn get_export_dir() -> PathBuf {
    get_app_dir().join("exports")
}
