//! Read-back verification of the export artifacts.
//!
//! Every artifact is parsed back and compared cell by cell, as display
//! strings, against the in-memory records.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Reader, Xlsx, open_workbook};
use polars::prelude::{CsvReadOptions, DataFrame, IpcReader, SerReader};
use tracing::{debug, info};
use wp_model::{WaterPointRecord, column_names};

use crate::display::{any_to_string, data_to_string, render_row};
use crate::frame::export_schema;
use crate::types::{ArtifactCheck, ExportFormat, ExportPaths};

/// Header and rows of an artifact, rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Verify all three artifacts against `records`.
///
/// Fails on the first difference in shape, header, or cell value.
pub fn verify_exports(
    records: &[WaterPointRecord],
    paths: &ExportPaths,
) -> Result<Vec<ArtifactCheck>> {
    let expected: Vec<Vec<String>> = records.iter().map(render_row).collect();
    let mut checks = Vec::with_capacity(ExportFormat::ALL.len());
    for (format, path) in paths.iter() {
        let table = read_back(format, path)?;
        compare(format, &expected, &table)?;
        debug!(%format, path = %path.display(), rows = table.rows.len(), "artifact verified");
        checks.push(ArtifactCheck {
            format,
            rows: table.rows.len(),
            columns: table.header.len(),
        });
    }
    info!(artifacts = checks.len(), rows = records.len(), "exports verified");
    Ok(checks)
}

/// Parse an artifact back into rendered strings.
pub fn read_back(format: ExportFormat, path: &Path) -> Result<RenderedTable> {
    match format {
        ExportFormat::Arrow => read_ipc(path),
        ExportFormat::Csv => read_csv(path),
        ExportFormat::Xlsx => read_xlsx(path),
    }
}

fn read_ipc(path: &Path) -> Result<RenderedTable> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let df = IpcReader::new(file)
        .finish()
        .with_context(|| format!("read {}", path.display()))?;
    render_frame(&df)
}

fn read_csv(path: &Path) -> Result<RenderedTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema(Some(Arc::new(export_schema())))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("read {}", path.display()))?;
    render_frame(&df)
}

fn render_frame(df: &DataFrame) -> Result<RenderedTable> {
    let header = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = df
            .get_columns()
            .iter()
            .map(|column| column.get(idx).map(any_to_string))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("read row {}", idx + 1))?;
        rows.push(row);
    }
    Ok(RenderedTable { header, rows })
}

fn read_xlsx(path: &Path) -> Result<RenderedTable> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("open {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("{} has no worksheet", path.display()))?
        .with_context(|| format!("read {}", path.display()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(data_to_string).collect::<Vec<_>>());
    let header = rows.next().unwrap_or_default();
    Ok(RenderedTable {
        header,
        rows: rows.collect(),
    })
}

fn compare(format: ExportFormat, expected: &[Vec<String>], table: &RenderedTable) -> Result<()> {
    let columns = column_names();
    if table.header != columns {
        bail!(
            "{format} export header differs: expected [{}], found [{}]",
            columns.join(", "),
            table.header.join(", ")
        );
    }
    if table.rows.len() != expected.len() {
        bail!(
            "{format} export has {} rows, expected {}",
            table.rows.len(),
            expected.len()
        );
    }
    for (idx, (want, found)) in expected.iter().zip(&table.rows).enumerate() {
        if found.len() != want.len() {
            bail!(
                "{format} export row {} has {} cells, expected {}",
                idx + 1,
                found.len(),
                want.len()
            );
        }
        for ((name, want), found) in columns.iter().zip(want).zip(found) {
            if want != found {
                bail!(
                    "{format} export differs at row {}, column {name}: expected {want:?}, found {found:?}",
                    idx + 1
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<String>>) -> RenderedTable {
        RenderedTable {
            header: column_names().into_iter().map(String::from).collect(),
            rows,
        }
    }

    fn blank_row() -> Vec<String> {
        vec![String::new(); column_names().len()]
    }

    #[test]
    fn test_compare_accepts_identical_tables() {
        let expected = vec![blank_row()];
        assert!(compare(ExportFormat::Csv, &expected, &table(expected.clone())).is_ok());
    }

    #[test]
    fn test_compare_reports_cell_difference() {
        let expected = vec![blank_row()];
        let mut found = blank_row();
        found[1] = "2023-04-02".to_string();
        let err = compare(ExportFormat::Xlsx, &expected, &table(vec![found])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "XLSX export differs at row 1, column submission_date: expected \"\", found \"2023-04-02\""
        );
    }

    #[test]
    fn test_compare_reports_row_count() {
        let err = compare(ExportFormat::Arrow, &[blank_row()], &table(vec![])).unwrap_err();
        assert_eq!(err.to_string(), "Arrow IPC export has 0 rows, expected 1");
    }

    #[test]
    fn test_compare_reports_header() {
        let mut rendered = table(vec![]);
        rendered.header.pop();
        assert!(compare(ExportFormat::Csv, &[], &rendered).is_err());
    }
}
