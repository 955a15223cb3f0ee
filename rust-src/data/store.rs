//! In-memory habit store and streak queries.

use std::collections::HashSet;
use std::path::Path;

use chrono::{Days, NaiveDate};

use super::snapshot::{load_snapshot, Snapshot, SnapshotError};
use crate::models::{Completion, Habit};


/// Source of current streak values.
pub trait StreakSource {
    /// Current streak for a habit, in scheduled days. Unknown habits have 0.
    fn streak(&self, habit_id: &str) -> u32;
}


/// Read-only snapshot of habits and completions anchored on a reference date.
#[derive(Debug, Clone)]
pub struct HabitStore {
    habits: Vec<Habit>,
    completions: Vec<Completion>,
    today: NaiveDate,
}


impl HabitStore {
    pub fn new(habits: Vec<Habit>, completions: Vec<Completion>, today: NaiveDate) -> Self {
        Self {
            habits,
            completions,
            today,
        }
    }

    /// Load a store from a snapshot file.
    pub fn open(path: &Path, today: NaiveDate) -> Result<Self, SnapshotError> {
        let Snapshot {
            habits,
            completions,
        } = load_snapshot(path)?;
        Ok(Self::new(habits, completions, today))
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    #[allow(dead_code)]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Find a habit by id.
    pub fn habit(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }
}


impl StreakSource for HabitStore {
    fn streak(&self, habit_id: &str) -> u32 {
        match self.habit(habit_id) {
            Some(habit) => current_streak(habit, &self.completions, self.today),
            None => 0,
        }
    }
}


/// Count consecutive completed scheduled days ending at `today`.
///
/// Unscheduled days neither break nor extend the streak. An uncompleted
/// `today` does not break it either, since the day is not over yet.
pub fn current_streak(habit: &Habit, completions: &[Completion], today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = completions
        .iter()
        .filter(|c| c.habit_id == habit.id)
        .map(|c| c.completed_date)
        .collect();

    let Some(&earliest) = dates.iter().min() else {
        return 0;
    };

    if habit.effective_active_days().is_empty() {
        return 0;
    }

    let mut current = today;
    if habit.is_scheduled_on(today) && !dates.contains(&today) {
        match today.checked_sub_days(Days::new(1)) {
            Some(prev) => current = prev,
            None => return 0,
        }
    }

    let mut streak = 0;
    while current >= earliest {
        if habit.is_scheduled_on(current) {
            if !dates.contains(&current) {
                break;
            }
            streak += 1;
        }

        match current.checked_sub_days(Days::new(1)) {
            Some(prev) => current = prev,
            None => break,
        }
    }

    streak
}
