//! Export command for JSON and CSV data files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

use super::open_store;
use crate::config::get_export_dir;
use crate::export::{
    build_export_rows,
    selection_summary,
    write_export,
    DateRange,
    ExportFilter,
    ExportFormat,
    TotalsScope,
};


/// Options collected from the command line.
#[derive(Debug, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub habits: Option<Vec<String>>,
    pub range_totals: bool,
    pub output: Option<PathBuf>,
}


/// Run the export command.
pub fn run(data_path: &Path, today: NaiveDate, options: ExportOptions) -> Result<()> {
    let store = open_store(data_path, today)?;

    let default_range = DateRange::default_for(today);
    let range = DateRange::new(
        options.from.unwrap_or(default_range.from),
        options.to.unwrap_or(default_range.to),
    );
    if range.from > range.to {
        anyhow::bail!("Invalid date range: {} is after {}", range.from, range.to);
    }

    if let Some(ids) = &options.habits {
        for id in ids {
            if store.habit(id).is_none() {
                anyhow::bail!("Unknown habit: {id}");
            }
        }
    }

    let filter = ExportFilter {
        habit_ids: options.habits,
        date_range: Some(range),
        totals: if options.range_totals {
            TotalsScope::InRange
        } else {
            TotalsScope::AllTime
        },
    };

    let summary = selection_summary(store.habits(), store.completions(), &filter);
    println!("Date range:  {} to {}", range.from, range.to);
    println!("Selected:    {} habit{}", summary.selected_habits, plural(summary.selected_habits));
    println!("Records:     {}", summary.completions_in_range);

    let format = if options.csv { ExportFormat::Csv } else { ExportFormat::Json };
    let rows = build_export_rows(store.habits(), store.completions(), &store, &filter);
    let payload = format.render(&rows)?;

    println!("Exporting to {}...", if options.csv { "CSV" } else { "JSON" });
    let path = write_export(&payload, format, options.output.as_deref(), &get_export_dir())?;

    println!("\x1b[32m+ Exported to: {}\x1b[0m", path.display());

    Ok(())
}


fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
