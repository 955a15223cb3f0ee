//! Overall and per-habit progress summaries.

use chrono::NaiveDate;

use super::engine::{
    completion_rate,
    heatmap,
    last_n_days_activity,
    scheduled_activity,
    weekly_completions,
    HeatmapCell,
    ScheduledActivity,
};
use crate::config::{ACTIVITY_DAYS, COMPLETION_WINDOW_DAYS, HEATMAP_DAYS, STREAK_TARGET_DAYS};
use crate::data::StreakSource;
use crate::models::{Completion, Habit};


/// Headline numbers across every habit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverallSummary {
    pub total_completions: usize,
    pub longest_streak: u32,
    pub average_rate: u32,
    /// Total completions against one completion per habit per window day.
    pub completion_progress: f64,
    /// Longest streak against the streak target.
    pub streak_progress: f64,
}


/// Everything the progress view shows for one habit.
#[derive(Debug, Clone)]
pub struct HabitProgress {
    pub streak: u32,
    pub completion_rate: u32,
    pub total_completions: usize,
    pub weekly: Vec<u32>,
    pub last_days: Vec<u8>,
    pub scheduled: ScheduledActivity,
    pub heatmap: Vec<HeatmapCell>,
}


/// Compute the summary cards.
pub fn overall_summary<S: StreakSource + ?Sized>(
    habits: &[Habit],
    completions: &[Completion],
    streaks: &S,
    today: NaiveDate,
) -> OverallSummary {
    let total_completions = completions.len();

    let longest_streak = habits
        .iter()
        .map(|h| streaks.streak(&h.id))
        .max()
        .unwrap_or(0);

    let average_rate = if habits.is_empty() {
        0
    } else {
        let sum: u32 = habits
            .iter()
            .map(|h| completion_rate(h, completions, today, COMPLETION_WINDOW_DAYS))
            .sum();
        (sum as f64 / habits.len() as f64).round() as u32
    };

    let capacity = (habits.len() * COMPLETION_WINDOW_DAYS as usize).max(1);
    let completion_progress = (total_completions as f64 / capacity as f64 * 100.0).min(100.0);
    let streak_progress = (longest_streak as f64 / STREAK_TARGET_DAYS as f64 * 100.0).min(100.0);

    OverallSummary {
        total_completions,
        longest_streak,
        average_rate,
        completion_progress,
        streak_progress,
    }
}


/// Compute the progress card for one habit.
pub fn habit_progress<S: StreakSource + ?Sized>(
    habit: &Habit,
    completions: &[Completion],
    streaks: &S,
    today: NaiveDate,
) -> HabitProgress {
    HabitProgress {
        streak: streaks.streak(&habit.id),
        completion_rate: completion_rate(habit, completions, today, COMPLETION_WINDOW_DAYS),
        total_completions: completions.iter().filter(|c| c.habit_id == habit.id).count(),
        weekly: weekly_completions(&habit.id, completions, today),
        last_days: last_n_days_activity(&habit.id, completions, today, ACTIVITY_DAYS),
        scheduled: scheduled_activity(habit, completions, today, ACTIVITY_DAYS),
        heatmap: heatmap(habit, completions, today, HEATMAP_DAYS),
    }
}
