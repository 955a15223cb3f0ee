//! Time-windowed habit metrics.
//!
//! Every function is anchored on an explicit `today` and treats the
//! completion slice as a read-only snapshot. Windows stop at
//! `NaiveDate::MIN`, so they may be shorter than requested there.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::config::{DAYS_PER_WEEK, WEEKLY_BUCKETS};
use crate::models::{weekday_index, Completion, Habit};


/// Classification of one calendar day for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    NotScheduled,
    Completed,
    Missed,
}


impl DayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotScheduled => "Not scheduled",
            Self::Completed => "Completed",
            Self::Missed => "Missed",
        }
    }
}


/// One heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub weekday: u8,
    pub status: DayStatus,
}


/// Completed vs scheduled day counts over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduledActivity {
    pub completed: u32,
    pub scheduled: u32,
}


/// Distinct completion dates for a habit.
fn completed_dates(habit_id: &str, completions: &[Completion]) -> HashSet<NaiveDate> {
    completions
        .iter()
        .filter(|c| c.habit_id == habit_id)
        .map(|c| c.completed_date)
        .collect()
}


/// The date `offset` days before `today`, if it is representable.
fn days_before(today: NaiveDate, offset: u32) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(u64::from(offset)))
}


/// Weekday indices (0 = Sunday) the habit is scheduled on.
pub fn active_day_set(habit: &Habit) -> Vec<u8> {
    habit.effective_active_days()
}


/// Percentage of scheduled days in the last `window_days` (today included)
/// that have a completion. Returns 0 when no day in the window is scheduled.
pub fn completion_rate(
    habit: &Habit,
    completions: &[Completion],
    today: NaiveDate,
    window_days: u32,
) -> u32 {
    let active_days = active_day_set(habit);
    if active_days.is_empty() {
        return 0;
    }

    let dates = completed_dates(&habit.id, completions);
    let mut scheduled = 0u32;
    let mut completed = 0u32;

    for offset in 0..window_days {
        let Some(date) = days_before(today, offset) else {
            break;
        };
        if active_days.contains(&weekday_index(date)) {
            scheduled += 1;
            if dates.contains(&date) {
                completed += 1;
            }
        }
    }

    if scheduled == 0 {
        return 0;
    }

    ((completed as f64 / scheduled as f64) * 100.0).round() as u32
}


/// Days with a completion per week for the last twelve weeks, oldest first.
///
/// Scheduling is ignored; duplicate completions on a day count once.
pub fn weekly_completions(habit_id: &str, completions: &[Completion], today: NaiveDate) -> Vec<u32> {
    let dates = completed_dates(habit_id, completions);

    let mut weeks: Vec<u32> = (0..WEEKLY_BUCKETS)
        .map(|week| {
            (0..DAYS_PER_WEEK)
                .filter(|day| {
                    days_before(today, week * DAYS_PER_WEEK + day)
                        .is_some_and(|date| dates.contains(&date))
                })
                .count() as u32
        })
        .collect();

    weeks.reverse();
    weeks
}


/// One flag per day for the last `days` days, oldest first: 1 if completed.
pub fn last_n_days_activity(
    habit_id: &str,
    completions: &[Completion],
    today: NaiveDate,
    days: u32,
) -> Vec<u8> {
    let dates = completed_dates(habit_id, completions);

    (0..days)
        .rev()
        .filter_map(|offset| days_before(today, offset))
        .map(|date| u8::from(dates.contains(&date)))
        .collect()
}


/// Classify a single date for a habit.
#[allow(dead_code)]
pub fn classify_day(habit: &Habit, completions: &[Completion], date: NaiveDate) -> DayStatus {
    let completed = completions
        .iter()
        .any(|c| c.habit_id == habit.id && c.completed_date == date);
    status_for(habit, completed, date)
}


fn status_for(habit: &Habit, completed: bool, date: NaiveDate) -> DayStatus {
    if !habit.is_scheduled_on(date) {
        DayStatus::NotScheduled
    } else if completed {
        DayStatus::Completed
    } else {
        DayStatus::Missed
    }
}


/// Classified cells for the last `days` days, oldest first.
pub fn heatmap(
    habit: &Habit,
    completions: &[Completion],
    today: NaiveDate,
    days: u32,
) -> Vec<HeatmapCell> {
    let dates = completed_dates(&habit.id, completions);

    (0..days)
        .rev()
        .filter_map(|offset| days_before(today, offset))
        .map(|date| HeatmapCell {
            date,
            weekday: weekday_index(date),
            status: status_for(habit, dates.contains(&date), date),
        })
        .collect()
}


/// Completed and scheduled day counts for the last `days` days.
pub fn scheduled_activity(
    habit: &Habit,
    completions: &[Completion],
    today: NaiveDate,
    days: u32,
) -> ScheduledActivity {
    heatmap(habit, completions, today, days)
        .iter()
        .fold(ScheduledActivity::default(), |mut acc, cell| {
            match cell.status {
                DayStatus::Completed => {
                    acc.completed += 1;
                    acc.scheduled += 1;
                }
                DayStatus::Missed => acc.scheduled += 1,
                DayStatus::NotScheduled => {}
            }
            acc
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::{Duration, Utc};

    // 2024-03-15 is a Friday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn habit(frequency: Frequency, active_days: Vec<u8>) -> Habit {
        Habit {
            id: "h1".to_string(),
            name: "Read".to_string(),
            description: String::new(),
            icon: String::new(),
            color: "#3b82f6".to_string(),
            frequency,
            active_days,
            created_at: Utc::now(),
        }
    }

    fn done(offset: i64) -> Completion {
        Completion::new("h1", today() - Duration::days(offset))
    }

    #[test]
    fn test_new_daily_habit_is_all_zero() {
        let h = habit(Frequency::Daily, vec![]);
        assert_eq!(completion_rate(&h, &[], today(), 30), 0);
        assert_eq!(last_n_days_activity("h1", &[], today(), 30), vec![0; 30]);
        assert_eq!(weekly_completions("h1", &[], today()), vec![0; 12]);
    }

    #[test]
    fn test_daily_denominator_is_window() {
        let h = habit(Frequency::Daily, vec![2]);
        // 15 of 30 days completed
        let completions: Vec<_> = (0..15).map(|i| done(i * 2)).collect();
        assert_eq!(completion_rate(&h, &completions, today(), 30), 50);

        let activity = scheduled_activity(&h, &completions, today(), 30);
        assert_eq!(activity.scheduled, 30);
        assert_eq!(activity.completed, 15);
    }

    #[test]
    fn test_empty_active_days_rate_zero() {
        let h = habit(Frequency::Custom, vec![]);
        let completions: Vec<_> = (0..30).map(done).collect();
        assert_eq!(completion_rate(&h, &completions, today(), 30), 0);
    }

    #[test]
    fn test_zero_window_rate_zero() {
        let h = habit(Frequency::Daily, vec![]);
        assert_eq!(completion_rate(&h, &[done(0)], today(), 0), 0);
    }

    #[test]
    fn test_weekday_habit_recent_completions() {
        let h = habit(Frequency::Custom, vec![1, 2, 3, 4, 5]);

        // Ten most recent weekdays counting back from Friday 2024-03-15
        let completions: Vec<_> = (0..30)
            .map(|i| today() - Duration::days(i))
            .filter(|d| (1..=5).contains(&weekday_index(*d)))
            .take(10)
            .map(|d| Completion::new("h1", d))
            .collect();
        assert_eq!(completions.len(), 10);

        // 30 days back from a Friday span 22 weekdays
        let expected = ((10.0 / 22.0) * 100.0_f64).round() as u32;
        assert_eq!(completion_rate(&h, &completions, today(), 30), expected);
        assert_eq!(expected, 45);
    }

    #[test]
    fn test_rate_ignores_other_habits_and_duplicates() {
        let h = habit(Frequency::Daily, vec![]);
        let completions = vec![
            done(0),
            done(0),
            Completion::new("h2", today() - Duration::days(1)),
        ];
        // 1 of 2 scheduled days
        assert_eq!(completion_rate(&h, &completions, today(), 2), 50);
    }

    #[test]
    fn test_weekly_buckets_oldest_first() {
        let completions = vec![done(0), done(1), done(1), done(7), done(83), done(84)];
        let weeks = weekly_completions("h1", &completions, today());

        assert_eq!(weeks.len(), 12);
        assert_eq!(weeks[11], 2);
        assert_eq!(weeks[10], 1);
        // offset 84 falls outside the 12-week window
        assert_eq!(weeks[0], 1);
        assert_eq!(weeks.iter().sum::<u32>(), 4);
    }

    #[test]
    fn test_last_n_days_oldest_first() {
        let completions = vec![done(0), done(29), done(30)];
        let days = last_n_days_activity("h1", &completions, today(), 30);

        assert_eq!(days.len(), 30);
        assert_eq!(days[0], 1);
        assert_eq!(days[29], 1);
        assert_eq!(days.iter().map(|&d| d as u32).sum::<u32>(), 2);
    }

    #[test]
    fn test_classification_partition() {
        let h = habit(Frequency::Custom, vec![5]);
        let completions = vec![done(0), done(1)];

        // Friday, completed
        assert_eq!(classify_day(&h, &completions, today()), DayStatus::Completed);
        // Thursday, completed but not scheduled
        assert_eq!(
            classify_day(&h, &completions, today() - Duration::days(1)),
            DayStatus::NotScheduled
        );
        // Previous Friday, missed
        assert_eq!(
            classify_day(&h, &completions, today() - Duration::days(7)),
            DayStatus::Missed
        );

        for cell in heatmap(&h, &completions, today(), 90) {
            if cell.status == DayStatus::Completed {
                assert!(h.is_scheduled_on(cell.date));
            }
        }
    }

    #[test]
    fn test_heatmap_shape() {
        let h = habit(Frequency::Daily, vec![]);
        let cells = heatmap(&h, &[done(0)], today(), 90);

        assert_eq!(cells.len(), 90);
        assert_eq!(cells[0].date, today() - Duration::days(89));
        assert_eq!(cells[89].date, today());
        assert_eq!(cells[89].weekday, 5);
        assert_eq!(cells[89].status, DayStatus::Completed);
        assert_eq!(cells[88].status, DayStatus::Missed);
    }

    #[test]
    fn test_windows_stop_at_earliest_date() {
        let h = habit(Frequency::Daily, vec![]);
        let earliest = NaiveDate::MIN + Duration::days(4);
        let completions = vec![Completion::new("h1", NaiveDate::MIN)];

        let cells = heatmap(&h, &completions, earliest, 90);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].date, NaiveDate::MIN);
        assert_eq!(cells[0].status, DayStatus::Completed);
        assert_eq!(cells[4].date, earliest);

        assert_eq!(last_n_days_activity("h1", &completions, earliest, 30), vec![1, 0, 0, 0, 0]);
        // 1 of the 5 representable days
        assert_eq!(completion_rate(&h, &completions, earliest, 30), 20);
        assert_eq!(weekly_completions("h1", &completions, earliest)[11], 1);
        assert_eq!(scheduled_activity(&h, &completions, earliest, 90).scheduled, 5);
    }
}
