//! File loaders for the ingestion pipeline.
//!
//! Each loader reads the whole file up front and fails with a file load
//! error on I/O or format problems, leaving no partial state behind.

use docroute_common::{DocRouteError, Result};
use std::path::Path;
use tracing::error;

/// Load a CSV file into rows of string cells.
///
/// The first line is treated as a header and not returned as a row.
pub fn load_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            error!("Error loading CSV file '{}': {}", path.display(), e);
            DocRouteError::file_load(format!("{}: {}", path.display(), e))
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            error!("Error loading CSV file '{}': {}", path.display(), e);
            DocRouteError::file_load(format!("{}: {}", path.display(), e))
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Load and parse a JSON file
pub fn load_json(path: &Path) -> Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        error!("Error loading JSON file '{}': {}", path.display(), e);
        DocRouteError::file_load(format!("{}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        error!("Error loading JSON file '{}': {}", path.display(), e);
        DocRouteError::file_load(format!("{}: {}", path.display(), e))
    })
}

/// Load a plain text file
pub fn load_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        error!("Error loading text file '{}': {}", path.display(), e);
        DocRouteError::file_load(format!("{}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_csv_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name,age").unwrap();
        writeln!(file, "kim,30").unwrap();
        writeln!(file, "lee,25").unwrap();

        let rows = load_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["kim", "30"]);
    }

    #[test]
    fn test_load_json_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"[{"a": 1}]"#).unwrap();

        let value = load_json(&path).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn test_load_json_malformed_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, DocRouteError::FileLoad(_)));
    }

    #[test]
    fn test_load_text_missing_file_fails() {
        let err = load_text(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(matches!(err, DocRouteError::FileLoad(_)));
    }
}
