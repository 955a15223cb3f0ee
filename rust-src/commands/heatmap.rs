//! Heatmap command - render a habit's recent history as an image.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

use super::open_store;
use crate::analytics::heatmap;
use crate::config::{get_export_dir, HEATMAP_DAYS};
use crate::visualization::{export_heatmap_png, export_heatmap_svg, open_file};


/// Run the heatmap command.
pub fn run(
    data_path: &Path,
    today: NaiveDate,
    habit_id: &str,
    svg: bool,
    should_open: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let store = open_store(data_path, today)?;

    let Some(habit) = store.habit(habit_id) else {
        anyhow::bail!("Unknown habit: {habit_id}");
    };

    let format_type = if svg { "svg" } else { "png" };
    let output_path = match output {
        Some(path) => path,
        None => {
            let default_dir = get_export_dir();
            std::fs::create_dir_all(&default_dir)?;
            default_dir.join(format!("heatmap-{}.{}", habit.id, format_type))
        }
    };

    let cells = heatmap(habit, store.completions(), today, HEATMAP_DAYS);

    println!("Exporting to {}...", format_type.to_uppercase());
    if svg {
        export_heatmap_svg(habit, &cells, &output_path)?;
    } else {
        export_heatmap_png(habit, &cells, &output_path)?;
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    if should_open {
        println!("Opening {}...", format_type.to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}
