//! Progress dashboard rendering using terminal output.

use std::fmt::Write as _;

use crate::analytics::{DayStatus, HabitProgress, OverallSummary};
use crate::models::Habit;


// Constants
const ORANGE: &str = "\x1b[38;5;208m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 20;
const CHART_HEIGHT: u32 = 7;


/// Create a simple text bar for a percentage.
fn create_bar(percentage: f64, width: usize, color: &str) -> String {
    let filled = ((percentage / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!(
        "{}{}{}{}{}",
        color,
        "█".repeat(filled),
        RESET,
        DIM,
        "░".repeat(width - filled),
    ) + RESET
}


/// Render the complete dashboard.
pub fn render_dashboard(summary: &OverallSummary, habits: &[(&Habit, HabitProgress)]) -> String {
    let mut out = String::new();

    render_kpi_section(&mut out, summary);
    out.push('\n');

    if habits.is_empty() {
        let _ = writeln!(out, "{}No habits yet{}", DIM, RESET);
        return out;
    }

    for (habit, progress) in habits {
        render_habit(&mut out, habit, progress);
        out.push('\n');
    }

    out
}


/// Render the KPI cards section.
fn render_kpi_section(out: &mut String, summary: &OverallSummary) {
    let width = 28;
    let border = "─".repeat(width - 2);

    let _ = writeln!(out, "┌{}┐  ┌{}┐  ┌{}┐", border, border, border);
    let _ = writeln!(
        out,
        "│{:^26}│  │{:^26}│  │{:^26}│",
        "Total Completions", "Longest Streak", "Average Rate"
    );
    let _ = writeln!(
        out,
        "│{}{}{:^26}{}│  │{}{}{:^26}{}│  │{}{}{:^26}{}│",
        BOLD, CYAN, summary.total_completions, RESET,
        BOLD, ORANGE, format!("{} days", summary.longest_streak), RESET,
        BOLD, GREEN, format!("{}%", summary.average_rate), RESET,
    );
    let _ = writeln!(
        out,
        "│ {} │  │ {} │  │ {} │",
        create_bar(summary.completion_progress, width - 4, CYAN),
        create_bar(summary.streak_progress, width - 4, ORANGE),
        create_bar(summary.average_rate as f64, width - 4, GREEN),
    );
    let _ = writeln!(out, "└{}┘  └{}┘  └{}┘", border, border, border);
}


/// Render one habit card.
fn render_habit(out: &mut String, habit: &Habit, progress: &HabitProgress) {
    let title = if habit.icon.is_empty() {
        habit.name.clone()
    } else {
        format!("{} {}", habit.icon, habit.name)
    };

    let _ = writeln!(out, "{}{}{}", BOLD, title, RESET);
    if !habit.description.is_empty() {
        let _ = writeln!(out, "{}{}{}", DIM, habit.description, RESET);
    }

    let _ = writeln!(
        out,
        "  Completion rate  {} {}{:>3}%{}",
        create_bar(progress.completion_rate as f64, BAR_WIDTH, GREEN),
        GREEN, progress.completion_rate, RESET,
    );
    let _ = writeln!(out, "  Current streak   {}{} days in a row{}", ORANGE, progress.streak, RESET);
    let _ = writeln!(out, "  Completions      {}{} all time{}", CYAN, progress.total_completions, RESET);

    let _ = writeln!(out, "\n  {}Weekly Progress (12 weeks){}", DIM, RESET);
    render_weekly_chart(out, &progress.weekly);

    let _ = writeln!(
        out,
        "\n  {}Last 30 Days Activity{}  {} / {} completed",
        DIM, RESET, progress.scheduled.completed, progress.scheduled.scheduled,
    );
    render_activity_strip(out, progress);
}


/// Render the weekly bar chart, oldest week on the left.
fn render_weekly_chart(out: &mut String, weekly: &[u32]) {
    let max_value = weekly.iter().copied().max().unwrap_or(0).max(CHART_HEIGHT);

    for level in (1..=CHART_HEIGHT).rev() {
        out.push_str("  ");
        for &value in weekly {
            let height = (value as f64 / max_value as f64 * CHART_HEIGHT as f64).round() as u32;
            if height >= level {
                let _ = write!(out, "{}██{} ", ORANGE, RESET);
            } else {
                out.push_str("   ");
            }
        }
        out.push('\n');
    }

    out.push_str("  ");
    for value in weekly {
        let _ = write!(out, "{:<3}", value);
    }
    out.push('\n');
}


/// Render the 30-day strip: completion comes from the activity flags,
/// scheduling from the matching heatmap cells.
fn render_activity_strip(out: &mut String, progress: &HabitProgress) {
    let days = progress.last_days.len();
    let cells = &progress.heatmap[progress.heatmap.len().saturating_sub(days)..];

    out.push_str("  ");
    for (&flag, cell) in progress.last_days.iter().zip(cells) {
        let glyph = match cell.status {
            DayStatus::NotScheduled => format!("{}·{}", DIM, RESET),
            _ if flag == 1 => format!("{}■{}", GREEN, RESET),
            _ => format!("{}□{}", RED, RESET),
        };
        out.push_str(&glyph);
    }
    out.push('\n');
}
