use std::collections::BTreeSet;
use std::fs;

use tempfile::TempDir;
use wp_model::{Column, WaterPointRecord};
use wp_output::{
    ExportFormat, XLSX_MAX_STRING_LEN, read_back, render_row, verify_exports, write_exports,
};

fn records() -> Vec<WaterPointRecord> {
    let mut first = WaterPointRecord::for_row(1);
    first.water_point_name = Some("Nsanje, \"Bangula\" borehole".to_string());
    first.submission_date = Some("2023-04-02".to_string());
    first.latitude = Some(-16.925);
    first.longitude = Some(35.263);
    first.pump_feel = Some("Stiff,Noisy".to_string());
    first.ph = Some(7.0);
    first.temperature_c = Some(46.0);
    first.conductivity = Some(512.5);
    first.conductivity_unit = Some("µS / cm".to_string());
    first.ecoli_mpn_100ml = Some(0.0);

    let mut second = WaterPointRecord::for_row(3);
    second.water_point_name = Some("Chikwawa 4".to_string());
    second.submission_date = Some("12 March".to_string());
    second.latitude = Some(-16.03);
    second.longitude = Some(34.8);
    second.risk_level = Some("High".to_string());

    vec![first, second]
}

#[test]
fn exports_round_trip_and_verify() {
    let dir = TempDir::new().unwrap();
    let records = records();

    let paths = write_exports(&records, dir.path(), "waterpoints").unwrap();
    for (_, path) in paths.iter() {
        assert!(path.exists(), "{} missing", path.display());
    }

    let checks = verify_exports(&records, &paths).unwrap();
    assert_eq!(checks.len(), 3);
    for check in checks {
        assert_eq!(check.rows, 2);
        assert_eq!(check.columns, Column::ALL.len());
    }
}

#[test]
fn exports_share_column_value_sets() {
    let dir = TempDir::new().unwrap();
    let records = records();
    let paths = write_exports(&records, dir.path(), "wp").unwrap();

    let expected: Vec<Vec<String>> = records.iter().map(render_row).collect();
    for (format, path) in paths.iter() {
        let table = read_back(format, path).unwrap();
        for column in Column::ALL {
            let idx = column.position();
            let want: BTreeSet<&str> = expected.iter().map(|row| row[idx].as_str()).collect();
            let found: BTreeSet<&str> = table.rows.iter().map(|row| row[idx].as_str()).collect();
            assert_eq!(want, found, "{format} column {column}");
        }
    }
}

#[test]
fn tampered_csv_fails_verification() {
    let dir = TempDir::new().unwrap();
    let records = records();
    let paths = write_exports(&records, dir.path(), "waterpoints").unwrap();

    let text = fs::read_to_string(&paths.csv).unwrap();
    fs::write(&paths.csv, text.replace("Chikwawa 4", "Chikwawa 5")).unwrap();

    let err = verify_exports(&records, &paths).unwrap_err();
    assert!(err.to_string().contains("CSV export differs"), "{err}");
    assert!(err.to_string().contains("water_point_name"), "{err}");
}

#[test]
fn empty_table_exports_header_only() {
    let dir = TempDir::new().unwrap();
    let paths = write_exports(&[], dir.path(), "empty").unwrap();
    let checks = verify_exports(&[], &paths).unwrap();
    assert!(checks.iter().all(|check| check.rows == 0));

    let csv = read_back(ExportFormat::Csv, &paths.csv).unwrap();
    assert_eq!(csv.header.len(), Column::ALL.len());
}

#[test]
fn oversized_text_cell_fails_before_any_artifact() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let mut records = records();
    records[1].pump_feel = Some("n".repeat(XLSX_MAX_STRING_LEN + 1));

    let err = write_exports(&records, &output_dir, "waterpoints").unwrap_err();
    assert!(err.to_string().contains("pump_feel"), "{err}");
    assert!(err.to_string().contains("source row 3"), "{err}");
    assert!(!output_dir.exists());
}
