//! Configuration and settings for Habit Pulse.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    get_app_dir,
    get_data_path,
    get_export_dir,
    ACTIVITY_DAYS,
    COMPLETION_WINDOW_DAYS,
    CSV_EXPORT_FILENAME,
    DAYS_PER_WEEK,
    DEFAULT_EXPORT_RANGE_DAYS,
    HEATMAP_DAYS,
    JSON_EXPORT_FILENAME,
    STREAK_TARGET_DAYS,
    WEEKLY_BUCKETS,
};
