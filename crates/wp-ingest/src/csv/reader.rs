//! Raw CSV loading into typed records.
//!
//! Cells are read as bytes so that text fields keep their original encoding
//! until the encoding normalization stage decides how to decode them.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};
use wp_model::RawRecord;

use crate::error::{IngestError, Result};

use super::header::{HeaderBinding, normalize_header};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Raw export bound to the schema.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub path: PathBuf,
    /// Normalized header names as found in the file.
    pub headers: Vec<String>,
    /// Header names that were not bound to a schema column.
    pub ignored_columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Number of columns in the raw header.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a raw export into schema-bound records.
///
/// Fails when the file is absent, unparsable, lacks a schema column, or has
/// no data rows. Unknown header columns are ignored with a warning.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    check_file_size(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::from_csv(path, e))?;

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| IngestError::from_csv(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let binding = HeaderBinding::bind(&headers).map_err(|columns| IngestError::MissingColumns {
        path: path.to_path_buf(),
        columns,
    })?;
    for name in &binding.ignored {
        warn!(path = %path.display(), column = %name, "ignoring column not in schema");
    }

    let mut records = Vec::new();
    for (idx, row) in reader.byte_records().enumerate() {
        let row = row.map_err(|e| IngestError::from_csv(path, e))?;
        if row.iter().all(|field| field.trim_ascii().is_empty()) {
            debug!(row = idx + 1, "skipping blank row");
            continue;
        }
        records.push(binding.build_record(&row, idx + 1));
    }

    if records.is_empty() {
        return Err(IngestError::NoDataRows {
            path: path.to_path_buf(),
        });
    }

    Ok(RawTable {
        path: path.to_path_buf(),
        ignored_columns: binding.ignored.clone(),
        headers,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wp_model::column_names;

    fn header_line() -> String {
        column_names().join(",")
    }

    fn row(values: &[(&str, &str)]) -> String {
        column_names()
            .iter()
            .map(|name| {
                values
                    .iter()
                    .find(|(column, _)| column == name)
                    .map(|(_, value)| (*value).to_string())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_raw_table_counts() {
        let content = format!(
            "{}\n{}\n{}\n",
            header_line(),
            row(&[("water_point_name", "A"), ("latitude", "-15.1"), ("longitude", "35.2")]),
            row(&[("water_point_name", "B"), ("ph", "6.9")]),
        );
        let file = create_temp_csv(content.as_bytes());
        let table = read_raw_table(file.path()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), column_names().len());
        assert_eq!(table.records[0].latitude, Some(-15.1));
        assert_eq!(table.records[1].ph, Some(6.9));
        assert_eq!(table.records[1].source_row, 2);
    }

    #[test]
    fn test_read_raw_table_keeps_invalid_utf8_bytes() {
        let text = format!(
            "{}\n{}\n",
            header_line(),
            row(&[("water_point_name", "Zomba"), ("conductivity_unit", "@S / cm")])
        );
        let content: Vec<u8> = text
            .bytes()
            .map(|byte| if byte == b'@' { 0xb5 } else { byte })
            .collect();
        let file = create_temp_csv(&content);

        let table = read_raw_table(file.path()).unwrap();
        assert_eq!(
            table.records[0].conductivity_unit.as_deref(),
            Some(&b"\xb5S / cm"[..])
        );
    }

    #[test]
    fn test_read_raw_table_with_bom_and_extra_column() {
        let content = format!(
            "\u{feff}{},_index\n{},99\n",
            header_line(),
            row(&[("water_point_name", "C")])
        );
        let file = create_temp_csv(content.as_bytes());
        let table = read_raw_table(file.path()).unwrap();

        assert_eq!(table.ignored_columns, vec!["_index"]);
        assert_eq!(table.records.len(), 1);
    }

    #[test]
    fn test_read_raw_table_missing_file() {
        let result = read_raw_table(Path::new("/nonexistent/raw.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_raw_table_missing_columns() {
        let file = create_temp_csv(b"water_point_name,ph\nA,7\n");
        let result = read_raw_table(file.path());
        match result {
            Err(IngestError::MissingColumns { columns, .. }) => {
                assert_eq!(columns.len(), column_names().len() - 2);
                assert!(columns.contains(&"latitude".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_read_raw_table_header_only() {
        let file = create_temp_csv(format!("{}\n", header_line()).as_bytes());
        let result = read_raw_table(file.path());
        assert!(matches!(result, Err(IngestError::NoDataRows { .. })));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv(b"0123456789");
        assert!(check_file_size_with_limit(file.path(), 100).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 5),
            Err(IngestError::FileTooLarge { size: 10, .. })
        ));
    }
}
