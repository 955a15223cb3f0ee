//! Visualization layer for dashboards and heatmaps.

mod dashboard;
mod heatmap;

pub use dashboard::render_dashboard;
pub use heatmap::{export_heatmap_png, export_heatmap_svg, open_file};
