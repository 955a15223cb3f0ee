//! CLI definitions using clap.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::commands;
use crate::config::get_data_path;


/// Habit Pulse - habit progress analytics and data export
#[derive(Parser)]
#[command(name = "hbt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Habit snapshot file (default: ~/.habit-pulse/habits.json)
    #[arg(long, global = true, env = "HBT_DATA")]
    data: Option<PathBuf>,

    /// Reference date for all windows (default: today)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Show progress dashboard with summary cards and per-habit charts
    Progress {
        /// Only show this habit
        #[arg(long)]
        habit: Option<String>,
    },

    /// Export habit data as JSON or CSV
    Export {
        /// Export as CSV instead of JSON
        #[arg(long)]
        csv: bool,

        /// Start of the date range (default: 30 days ago)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// End of the date range (default: today)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        /// Habit to include (repeatable; default: all habits)
        #[arg(long = "habit")]
        habits: Vec<String>,

        /// Export no habits at all
        #[arg(long, conflicts_with = "habits")]
        none: bool,

        /// Count only completions inside the date range in totals
        #[arg(long)]
        range_totals: bool,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a habit's 90-day heatmap as PNG or SVG
    Heatmap {
        /// Habit id
        habit: String,

        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}


/// Parse a YYYY-MM-DD date argument.
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_path = cli.data.unwrap_or_else(get_data_path);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Some(Commands::Progress { habit }) => {
            commands::progress::run(&data_path, today, habit.as_deref())?;
        }
        Some(Commands::Export { csv, from, to, habits, none, range_totals, output }) => {
            let selection = if none {
                Some(Vec::new())
            } else if habits.is_empty() {
                None
            } else {
                Some(habits)
            };
            commands::export::run(
                &data_path,
                today,
                commands::export::ExportOptions {
                    csv,
                    from,
                    to,
                    habits: selection,
                    range_totals,
                    output,
                },
            )?;
        }
        Some(Commands::Heatmap { habit, svg, open, output }) => {
            commands::heatmap::run(&data_path, today, &habit, svg, open, output)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
