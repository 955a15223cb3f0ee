//! Domain models for habits and their completions.

mod habit;

pub use habit::{
    weekday_index,
    Completion,
    Frequency,
    Habit,
    DEFAULT_HABIT_COLOR,
};
