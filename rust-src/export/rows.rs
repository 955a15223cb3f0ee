//! Flat export rows built from habits and completions.

use chrono::{Days, NaiveDate};

use crate::config::DEFAULT_EXPORT_RANGE_DAYS;
use crate::data::StreakSource;
use crate::models::{Completion, Frequency, Habit};


/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}


impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The last thirty days up to and including `today`, clamped to
    /// `NaiveDate::MIN`.
    pub fn default_for(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_days(Days::new(DEFAULT_EXPORT_RANGE_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}


/// Which completions feed a row's total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TotalsScope {
    /// Every completion of the habit, whatever the date range.
    #[default]
    AllTime,
    /// Only completions inside the filter's date range.
    InRange,
}


/// Selection applied when building export rows.
///
/// `habit_ids` restricts which habits get a row (`None` means all, an empty
/// list means none). `date_range` only changes row totals when `totals` is
/// [`TotalsScope::InRange`]; with the default scope it is used for the
/// selection summary alone.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub habit_ids: Option<Vec<String>>,
    pub date_range: Option<DateRange>,
    pub totals: TotalsScope,
}


impl ExportFilter {
    fn includes_habit(&self, habit: &Habit) -> bool {
        match &self.habit_ids {
            Some(ids) => ids.iter().any(|id| *id == habit.id),
            None => true,
        }
    }

    fn counts_completion(&self, completion: &Completion) -> bool {
        match (self.totals, self.date_range) {
            (TotalsScope::InRange, Some(range)) => range.contains(completion.completed_date),
            _ => true,
        }
    }
}


/// One exported habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub active_days: Vec<u8>,
    pub streak: u32,
    pub total_completions: usize,
    pub created_at: String,
}


impl ExportRow {
    /// "All" for daily habits, comma-joined weekday indices otherwise.
    pub fn active_days_label(&self) -> String {
        match self.frequency {
            Frequency::Daily => "All".to_string(),
            Frequency::Custom => self
                .active_days
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}


/// Counts shown before exporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    pub selected_habits: usize,
    pub completions_in_range: usize,
}


/// Build one row per selected habit, in snapshot order.
pub fn build_export_rows<S: StreakSource + ?Sized>(
    habits: &[Habit],
    completions: &[Completion],
    streaks: &S,
    filter: &ExportFilter,
) -> Vec<ExportRow> {
    habits
        .iter()
        .filter(|h| filter.includes_habit(h))
        .map(|habit| ExportRow {
            name: habit.name.clone(),
            description: habit.description.clone(),
            frequency: habit.frequency,
            active_days: habit.effective_active_days(),
            streak: streaks.streak(&habit.id),
            total_completions: completions
                .iter()
                .filter(|c| c.habit_id == habit.id && filter.counts_completion(c))
                .count(),
            created_at: habit.created_at_key(),
        })
        .collect()
}


/// Selected habit count and their completions inside the date range.
pub fn selection_summary(
    habits: &[Habit],
    completions: &[Completion],
    filter: &ExportFilter,
) -> SelectionSummary {
    let selected: Vec<&Habit> = habits.iter().filter(|h| filter.includes_habit(h)).collect();

    let completions_in_range = completions
        .iter()
        .filter(|c| selected.iter().any(|h| h.id == c.habit_id))
        .filter(|c| {
            filter
                .date_range
                .map_or(true, |range| range.contains(c.completed_date))
        })
        .count();

    SelectionSummary {
        selected_habits: selected.len(),
        completions_in_range,
    }
}
