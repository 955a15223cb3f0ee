//! Habit and completion models.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};


/// Weekday indices, Sunday first.
pub const ALL_WEEKDAYS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Color used when a habit has none (or an invalid one).
pub const DEFAULT_HABIT_COLOR: &str = "#3b82f6";


/// How often a habit is scheduled.
///
/// The legacy `weekly` label is accepted on input and always treated as
/// `custom`; this is the only place that normalization happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    #[serde(alias = "weekly")]
    Custom,
}


impl Frequency {
    /// Normalized label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Custom => "custom",
        }
    }
}


/// A user-defined recurring activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub active_days: Vec<u8>,
    pub created_at: DateTime<Utc>,
}


fn default_color() -> String {
    DEFAULT_HABIT_COLOR.to_string()
}


impl Habit {
    /// Weekdays this habit is scheduled on.
    ///
    /// Daily habits are scheduled every day whatever `active_days` holds.
    pub fn effective_active_days(&self) -> Vec<u8> {
        match self.frequency {
            Frequency::Daily => ALL_WEEKDAYS.to_vec(),
            Frequency::Custom => self.active_days.clone(),
        }
    }

    /// Check whether the habit is scheduled on the given date.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        let weekday = weekday_index(date);
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Custom => self.active_days.contains(&weekday),
        }
    }

    /// Created-at timestamp as exported (ISO 8601, millisecond precision).
    pub fn created_at_key(&self) -> String {
        self.created_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}


/// A record that a habit was performed on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub habit_id: String,
    pub completed_date: NaiveDate,
}


impl Completion {
    pub fn new(habit_id: impl Into<String>, completed_date: NaiveDate) -> Self {
        Self {
            habit_id: habit_id.into(),
            completed_date,
        }
    }

    /// Get date string in YYYY-MM-DD format.
    #[allow(dead_code)]
    pub fn date_key(&self) -> String {
        self.completed_date.format("%Y-%m-%d").to_string()
    }
}


/// Weekday index of a date, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}


#[cfg(test)]
mod tests {
    use super::*;

    fn habit(frequency: Frequency, active_days: Vec<u8>) -> Habit {
        Habit {
            id: "h1".to_string(),
            name: "Read".to_string(),
            description: String::new(),
            icon: String::new(),
            color: default_color(),
            frequency,
            active_days,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_frequency_labels() {
        assert_eq!(Frequency::Daily.label(), "daily");
        assert_eq!(Frequency::Custom.label(), "custom");
        assert!(serde_json::from_str::<Frequency>("\"monthly\"").is_err());
    }

    #[test]
    fn test_weekly_deserializes_as_custom() {
        let freq: Frequency = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(freq, Frequency::Custom);
        assert_eq!(serde_json::to_string(&freq).unwrap(), "\"custom\"");
    }

    #[test]
    fn test_daily_ignores_stored_days() {
        let h = habit(Frequency::Daily, vec![1]);
        assert_eq!(h.effective_active_days(), ALL_WEEKDAYS.to_vec());
        // 2024-03-16 is a Saturday
        assert!(h.is_scheduled_on(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
    }

    #[test]
    fn test_custom_uses_stored_days() {
        let h = habit(Frequency::Custom, vec![1, 3]);
        assert_eq!(h.effective_active_days(), vec![1, 3]);
        // 2024-03-11 is a Monday, 2024-03-12 a Tuesday
        assert!(h.is_scheduled_on(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
        assert!(!h.is_scheduled_on(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()));
    }

    #[test]
    fn test_weekday_index_sunday_first() {
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()), 0);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()), 5);
    }

    #[test]
    fn test_completion_date_key() {
        let c = Completion::new("h1", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(c.date_key(), "2024-03-05");
    }
}
