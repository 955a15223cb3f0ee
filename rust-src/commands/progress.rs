//! Progress command - show the habit dashboard.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use super::open_store;
use crate::analytics::{habit_progress, overall_summary};
use crate::visualization::render_dashboard;


/// Run the progress command.
pub fn run(data_path: &Path, today: NaiveDate, habit_id: Option<&str>) -> Result<()> {
    let store = open_store(data_path, today)?;

    let habits: Vec<_> = match habit_id {
        Some(id) => match store.habit(id) {
            Some(habit) => vec![habit],
            None => anyhow::bail!("Unknown habit: {id}"),
        },
        None => store.habits().iter().collect(),
    };

    let summary = overall_summary(store.habits(), store.completions(), &store, today);
    let cards: Vec<_> = habits
        .into_iter()
        .map(|habit| (habit, habit_progress(habit, store.completions(), &store, today)))
        .collect();

    print!("{}", render_dashboard(&summary, &cards));

    Ok(())
}
