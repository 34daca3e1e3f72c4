//! Artifact writers.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::{CsvWriter, DataFrame, IpcCompression, IpcWriter, SerWriter};
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;
use wp_model::{CellRef, Column, WaterPointRecord};

use crate::frame::build_frame;
use crate::types::ExportPaths;

/// Longest worksheet name a workbook accepts.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Longest string a single spreadsheet cell holds.
pub const XLSX_MAX_STRING_LEN: usize = 32_767;

/// Writes `<name>.arrow`, `<name>.csv` and `<name>.xlsx` into `output_dir`.
pub fn write_exports(
    records: &[WaterPointRecord],
    output_dir: &Path,
    dataset_name: &str,
) -> Result<ExportPaths> {
    // Checked up front so a failure leaves no partial set of artifacts.
    check_xlsx_limits(records)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let paths = ExportPaths::for_dataset(output_dir, dataset_name);

    let mut df = build_frame(records)?;
    write_ipc(&mut df, &paths.arrow)?;
    write_csv(&mut df, &paths.csv)?;
    write_xlsx(records, &paths.xlsx, dataset_name)?;

    info!(
        rows = records.len(),
        dir = %output_dir.display(),
        dataset = dataset_name,
        "exports written"
    );
    Ok(paths)
}

/// Arrow IPC file with zstd-compressed buffers.
pub fn write_ipc(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    IpcWriter::new(&mut file)
        .with_compression(Some(IpcCompression::default()))
        .finish(df)
        .with_context(|| format!("write {}", path.display()))
}

/// Comma-separated UTF-8 with a header row; nulls are empty fields.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .with_context(|| format!("write {}", path.display()))
}

/// Rejects text cells longer than [`XLSX_MAX_STRING_LEN`] characters.
pub fn check_xlsx_limits(records: &[WaterPointRecord]) -> Result<()> {
    for record in records {
        for column in Column::ALL {
            if let CellRef::Text(Some(value)) = record.cell(column) {
                let len = value.chars().count();
                if len > XLSX_MAX_STRING_LEN {
                    bail!(
                        "column {column} in source row {} holds {len} characters, \
                         more than the {XLSX_MAX_STRING_LEN} a spreadsheet cell allows",
                        record.source_row
                    );
                }
            }
        }
    }
    Ok(())
}

/// Single worksheet named after the dataset; numbers as numeric cells,
/// missing values as blank cells.
///
/// Text cells are limited to [`XLSX_MAX_STRING_LEN`] characters; see
/// [`check_xlsx_limits`].
pub fn write_xlsx(records: &[WaterPointRecord], path: &Path, dataset_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(dataset_name))
        .with_context(|| format!("name worksheet for {dataset_name}"))?;

    let header = Format::new().set_bold();
    for column in Column::ALL {
        worksheet
            .write_string_with_format(0, xlsx_col(column), column.as_str(), &header)
            .context("write spreadsheet header")?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1).context("too many rows for a worksheet")?;
        for column in Column::ALL {
            match record.cell(column) {
                CellRef::Numeric(Some(value)) => {
                    worksheet.write_number(row, xlsx_col(column), value)?;
                }
                CellRef::Text(Some(value)) => {
                    worksheet.write_string(row, xlsx_col(column), value)?;
                }
                CellRef::Numeric(None) | CellRef::Text(None) => {}
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("write {}", path.display()))
}

fn xlsx_col(column: Column) -> u16 {
    // The schema has far fewer columns than u16::MAX.
    column.position() as u16
}

/// Worksheet name derived from the dataset name.
///
/// Characters a workbook rejects become `_`; the result is capped at 31 chars.
pub fn sheet_name(dataset_name: &str) -> String {
    let name: String = dataset_name
        .trim()
        .trim_matches('\'')
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if name.is_empty() {
        wp_model::DEFAULT_DATASET_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name("waterpoints"), "waterpoints");
        assert_eq!(sheet_name("wp/2023:round[1]"), "wp_2023_round_1_");
        assert_eq!(sheet_name("  "), "waterpoints");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn test_check_xlsx_limits() {
        let mut record = WaterPointRecord::for_row(7);
        record.water_point_name = Some("é".repeat(XLSX_MAX_STRING_LEN));
        assert!(check_xlsx_limits(std::slice::from_ref(&record)).is_ok());

        record.water_point_name = Some("x".repeat(XLSX_MAX_STRING_LEN + 1));
        let message = check_xlsx_limits(&[record]).unwrap_err().to_string();
        assert!(message.contains("water_point_name"));
        assert!(message.contains("source row 7"));
        assert!(message.contains("32768 characters"));
    }
}
