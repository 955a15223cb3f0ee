//! Habit analytics: completion rates, activity windows and summaries.

mod engine;
mod summary;

#[allow(unused_imports)]
pub use engine::{
    active_day_set,
    classify_day,
    completion_rate,
    heatmap,
    last_n_days_activity,
    scheduled_activity,
    weekly_completions,
    DayStatus,
    HeatmapCell,
    ScheduledActivity,
};
pub use summary::{habit_progress, overall_summary, HabitProgress, OverallSummary};
