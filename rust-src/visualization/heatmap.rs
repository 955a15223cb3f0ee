//! Heatmap image export for a single habit.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::analytics::{DayStatus, HeatmapCell};
use crate::models::Habit;


// Dashboard color scheme
const BG: &str = "#111827";
const TEXT: &str = "#F9FAFB";
const TEXT_SECONDARY: &str = "#9CA3AF";
const MISSED_GREY: &str = "#374151";
const UNSCHEDULED_GREY: &str = "#1F2937";

// Cell dimensions (scaled for sharp output)
const SCALE_FACTOR: i32 = 3;
const CELL_SIZE: i32 = 12 * SCALE_FACTOR;
const CELL_GAP: i32 = 3 * SCALE_FACTOR;
const CELL_TOTAL: i32 = CELL_SIZE + CELL_GAP;

const GRID_LEFT: i32 = 40 * SCALE_FACTOR / 2;
const GRID_TOP: i32 = 60 * SCALE_FACTOR / 2;


/// Export heatmap as SVG.
pub fn export_heatmap_svg(habit: &Habit, cells: &[HeatmapCell], output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(habit, cells);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export heatmap as PNG.
pub fn export_heatmap_png(habit: &Habit, cells: &[HeatmapCell], output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(habit, cells);

    let tree = resvg::usvg::Tree::from_str(
        &svg_content,
        &resvg::usvg::Options::default(),
    ).context("Failed to parse SVG")?;

    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width() as u32, size.height() as u32)
        .context("Failed to create pixmap")?;

    let bg = hex_to_rgb(BG);
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap.save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


/// Lay cells out in Sunday-first week columns.
fn build_weeks(cells: &[HeatmapCell]) -> Vec<[Option<HeatmapCell>; 7]> {
    let mut weeks = Vec::new();
    let mut current: [Option<HeatmapCell>; 7] = [None; 7];
    let mut has_cells = false;

    for cell in cells {
        let row = cell.weekday as usize;
        if row == 0 && has_cells {
            weeks.push(current);
            current = [None; 7];
        }
        current[row] = Some(*cell);
        has_cells = true;
    }

    if has_cells {
        weeks.push(current);
    }

    weeks
}


/// Generate SVG content for the heatmap.
fn generate_svg(habit: &Habit, cells: &[HeatmapCell]) -> String {
    let weeks = build_weeks(cells);

    let num_weeks = weeks.len().max(1) as i32;
    let width = GRID_LEFT + (num_weeks * CELL_TOTAL) + 40;
    let height = GRID_TOP + (7 * CELL_TOTAL) + 60;

    let completed_color = habit.color.as_str();

    let mut svg_parts = vec![
        format!(r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#, width, height),
        "<style>".to_string(),
        format!("  .day-cell {{ stroke: {}; stroke-width: 1; }}", BG),
        format!("  .month-label {{ fill: {}; font: 24px sans-serif; }}", TEXT_SECONDARY),
        format!("  .day-label {{ fill: {}; font: 20px sans-serif; }}", TEXT_SECONDARY),
        format!("  .title {{ fill: {}; font: bold 32px sans-serif; }}", TEXT),
        format!("  .legend-text {{ fill: {}; font: 20px sans-serif; }}", TEXT_SECONDARY),
        "</style>".to_string(),
        format!(r#"<rect width="{}" height="{}" fill="{}"/>"#, width, height, BG),
    ];

    let title = match (cells.first(), cells.last()) {
        (Some(first), Some(last)) => format!("{} · {} to {}", habit.name, first.date, last.date),
        _ => habit.name.clone(),
    };
    svg_parts.push(format!(
        r#"<text x="10" y="40" class="title">{}</text>"#,
        escape_xml(&title)
    ));

    // Day labels
    for (day_idx, day_name) in ["S", "M", "T", "W", "T", "F", "S"].iter().enumerate() {
        let y = GRID_TOP + (day_idx as i32 * CELL_TOTAL) + (CELL_SIZE / 2) + 8;
        svg_parts.push(format!(r#"<text x="10" y="{}" class="day-label">{}</text>"#, y, day_name));
    }

    // Month labels
    let mut last_month = 0u32;
    for (week_idx, week) in weeks.iter().enumerate() {
        if let Some(cell) = week.iter().flatten().next() {
            let month = cell.date.month();
            if month != last_month {
                let x = GRID_LEFT + (week_idx as i32 * CELL_TOTAL);
                svg_parts.push(format!(
                    r#"<text x="{}" y="{}" class="month-label">{}</text>"#,
                    x, GRID_TOP - 12, month_abbrev(month)
                ));
                last_month = month;
            }
        }
    }

    // Heatmap cells
    for (week_idx, week) in weeks.iter().enumerate() {
        for (day_idx, cell) in week.iter().enumerate() {
            let Some(cell) = cell else { continue };

            let x = GRID_LEFT + (week_idx as i32 * CELL_TOTAL);
            let y = GRID_TOP + (day_idx as i32 * CELL_TOTAL);

            svg_parts.push(format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{}" class="day-cell"><title>{}</title></rect>"#,
                x, y, CELL_SIZE, CELL_SIZE,
                cell_color(cell.status, completed_color),
                tooltip(cell.date, cell.status),
            ));
        }
    }

    // Legend
    let legend_y = height - 20;
    let mut legend_x = GRID_LEFT;
    for status in [DayStatus::NotScheduled, DayStatus::Missed, DayStatus::Completed] {
        svg_parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{}" class="day-cell"/>"#,
            legend_x, legend_y - CELL_SIZE + 8, CELL_SIZE / 2 + 6, CELL_SIZE / 2 + 6,
            cell_color(status, completed_color)
        ));
        svg_parts.push(format!(
            r#"<text x="{}" y="{}" class="legend-text">{}</text>"#,
            legend_x + CELL_SIZE, legend_y, status.label()
        ));
        legend_x += 200;
    }

    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


fn cell_color(status: DayStatus, completed_color: &str) -> String {
    match status {
        DayStatus::NotScheduled => UNSCHEDULED_GREY.to_string(),
        DayStatus::Missed => MISSED_GREY.to_string(),
        DayStatus::Completed => completed_color.to_string(),
    }
}


fn tooltip(date: NaiveDate, status: DayStatus) -> String {
    format!("{}: {}", date.format("%Y-%m-%d"), status.label())
}


fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}


/// Convert hex color to RGB tuple.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = std::process::Command::new("xdg-open");

    command
        .arg(path)
        .spawn()
        .with_context(|| format!("Failed to open {}", path.display()))?;

    Ok(())
}


/// Get month abbreviation.
fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::heatmap;
    use crate::models::{Completion, Frequency};
    use chrono::Utc;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn habit() -> Habit {
        Habit {
            id: "h1".to_string(),
            name: "Read <daily>".to_string(),
            description: String::new(),
            icon: String::new(),
            color: "#22c55e".to_string(),
            frequency: Frequency::Custom,
            active_days: vec![1, 3, 5],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_weeks() {
        let cells = heatmap(&habit(), &[], today(), 90);
        let weeks = build_weeks(&cells);

        let placed: usize = weeks.iter().map(|w| w.iter().flatten().count()).sum();
        assert_eq!(placed, 90);
        // 90 days ending on a Friday start on a Sunday: 13 weeks minus one Saturday
        assert_eq!(weeks.len(), 13);
        assert!(weeks[12][6].is_none());
    }

    #[test]
    fn test_svg_contents() {
        let completions = vec![Completion::new("h1", today())];
        let cells = heatmap(&habit(), &completions, today(), 90);
        let svg = generate_svg(&habit(), &cells);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Read &lt;daily&gt;"));
        assert!(svg.contains("2024-03-15: Completed"));
        assert!(svg.contains("2024-03-14: Not scheduled"));
        assert!(svg.contains("2024-03-13: Missed"));
        assert!(svg.contains("#22c55e"));
    }

    #[test]
    fn test_export_svg_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("heatmap.svg");
        let cells = heatmap(&habit(), &[], today(), 90);

        export_heatmap_svg(&habit(), &cells, &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#22c55e"), (0x22, 0xc5, 0x5e));
        assert_eq!(hex_to_rgb("#zz"), (0, 0, 0));
    }
}
