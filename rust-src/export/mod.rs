//! Export of habit data as JSON or CSV.

mod format;
mod rows;

#[allow(unused_imports)]
pub use format::{to_csv, to_json, write_export, ExportFormat};
#[allow(unused_imports)]
pub use rows::{
    build_export_rows,
    selection_summary,
    DateRange,
    ExportFilter,
    ExportRow,
    SelectionSummary,
    TotalsScope,
};
