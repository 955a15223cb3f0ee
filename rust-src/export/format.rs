//! JSON and CSV serialization of export rows.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::rows::ExportRow;
use crate::config::{CSV_EXPORT_FILENAME, JSON_EXPORT_FILENAME};


const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Description",
    "Frequency",
    "Active Days (0=Sun)",
    "Streak",
    "Total Completions",
    "Created At",
];


/// Supported export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}


impl ExportFormat {
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Json => JSON_EXPORT_FILENAME,
            Self::Csv => CSV_EXPORT_FILENAME,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// Serialize rows in this format.
    pub fn render(&self, rows: &[ExportRow]) -> Result<String> {
        match self {
            Self::Json => to_json(rows).context("Failed to serialize JSON export"),
            Self::Csv => Ok(to_csv(rows)),
        }
    }
}


#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRecord<'a> {
    name: &'a str,
    description: &'a str,
    frequency: &'static str,
    #[serde(rename = "active_days")]
    active_days: &'a [u8],
    streak: u32,
    total_completions: usize,
    created_at: &'a str,
}


/// Pretty-printed JSON array of rows.
pub fn to_json(rows: &[ExportRow]) -> serde_json::Result<String> {
    let records: Vec<JsonRecord> = rows
        .iter()
        .map(|row| JsonRecord {
            name: &row.name,
            description: &row.description,
            frequency: row.frequency.label(),
            active_days: &row.active_days,
            streak: row.streak,
            total_completions: row.total_completions,
            created_at: &row.created_at,
        })
        .collect();

    serde_json::to_string_pretty(&records)
}


/// Header line plus one comma-joined line per row.
///
/// Only name and description are quoted. Other fields are written as-is.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for row in rows {
        let fields = [
            quote(&row.name),
            quote(&row.description),
            row.frequency.label().to_string(),
            row.active_days_label(),
            row.streak.to_string(),
            row.total_completions.to_string(),
            row.created_at.clone(),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n")
}


fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}


/// Write an export payload.
///
/// `output` may be a file path or an existing directory; a directory gets
/// the format's default file name. Without `output` the file lands in
/// `default_dir`, which is created if needed.
pub fn write_export(
    payload: &str,
    format: ExportFormat,
    output: Option<&Path>,
    default_dir: &Path,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) if path.is_dir() => path.join(format.filename()),
        Some(path) => path.to_path_buf(),
        None => {
            std::fs::create_dir_all(default_dir)
                .with_context(|| format!("Failed to create directory: {}", default_dir.display()))?;
            default_dir.join(format.filename())
        }
    };

    std::fs::write(&path, payload)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    info!(path = %path.display(), mime = format.mime_type(), bytes = payload.len(), "wrote export");
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use tempfile::TempDir;

    fn row(name: &str, frequency: Frequency, active_days: Vec<u8>) -> ExportRow {
        ExportRow {
            name: name.to_string(),
            description: "Morning \"routine\"".to_string(),
            frequency,
            active_days,
            streak: 2,
            total_completions: 7,
            created_at: "2024-01-02T03:04:05.000Z".to_string(),
        }
    }

    #[test]
    fn test_empty_exports() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
        assert_eq!(
            to_csv(&[]),
            "Name,Description,Frequency,Active Days (0=Sun),Streak,Total Completions,Created At"
        );
    }

    #[test]
    fn test_csv_quote_escaping() {
        let csv = to_csv(&[row("Say \"Hi\", Bob", Frequency::Custom, vec![1, 3])]);
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "\"Say \"\"Hi\"\", Bob\",\"Morning \"\"routine\"\"\",custom,1,3,2,7,2024-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn test_csv_daily_label() {
        let csv = to_csv(&[row("Read", Frequency::Daily, vec![0, 1, 2, 3, 4, 5, 6])]);
        assert!(csv.lines().nth(1).unwrap().contains(",daily,All,"));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_json_fields() {
        let json = to_json(&[row("Read", Frequency::Custom, vec![1, 5])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let record = &value[0];

        assert_eq!(record["name"], "Read");
        assert_eq!(record["frequency"], "custom");
        assert_eq!(record["active_days"], serde_json::json!([1, 5]));
        assert_eq!(record["streak"], 2);
        assert_eq!(record["totalCompletions"], 7);
        assert_eq!(record["createdAt"], "2024-01-02T03:04:05.000Z");
        assert_eq!(record.as_object().unwrap().len(), 7);
        assert!(json.contains("\n  {"));
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Json.filename(), "habit-tracker-data.json");
        assert_eq!(ExportFormat::Csv.filename(), "habit-tracker-data.csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    }

    #[test]
    fn test_write_export_default_dir() {
        let tmp_dir = TempDir::new().unwrap();
        let export_dir = tmp_dir.path().join("exports");

        let path = write_export("[]", ExportFormat::Json, None, &export_dir).unwrap();
        assert_eq!(path, export_dir.join("habit-tracker-data.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_write_export_into_directory() {
        let tmp_dir = TempDir::new().unwrap();
        let path = write_export("x", ExportFormat::Csv, Some(tmp_dir.path()), tmp_dir.path()).unwrap();
        assert_eq!(path, tmp_dir.path().join("habit-tracker-data.csv"));
    }
}
