//! Dataset summary for the operator report.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wp_model::{Column, WaterPointRecord};

/// Shape and coverage of the cleaned table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub distinct_water_points: usize,
    /// Earliest ISO-formatted submission date.
    pub first_submission: Option<String>,
    /// Latest ISO-formatted submission date.
    pub last_submission: Option<String>,
}

/// Summarize the cleaned records.
///
/// Submission dates that are not ISO calendar dates are left out of the
/// date span.
pub fn summarize(records: &[WaterPointRecord]) -> DatasetSummary {
    let names: BTreeSet<&str> = records.iter().filter_map(WaterPointRecord::name).collect();
    let dates: BTreeSet<NaiveDate> = records
        .iter()
        .filter_map(|record| record.submission_date.as_deref())
        .filter_map(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .collect();

    DatasetSummary {
        rows: records.len(),
        columns: Column::ALL.len(),
        distinct_water_points: names.len(),
        first_submission: dates.first().map(|date| date.format("%Y-%m-%d").to_string()),
        last_submission: dates.last().map(|date| date.format("%Y-%m-%d").to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, submitted: Option<&str>) -> WaterPointRecord {
        let mut record = WaterPointRecord::for_row(1);
        record.water_point_name = name.map(String::from);
        record.submission_date = submitted.map(String::from);
        record
    }

    #[test]
    fn counts_distinct_names_and_date_span() {
        let records = vec![
            record(Some("Nsanje 1"), Some("2023-04-02")),
            record(Some("Nsanje 1"), Some("2023-03-20")),
            record(Some("Chikwawa 4"), Some("soon")),
            record(None, None),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.rows, 4);
        assert_eq!(summary.columns, Column::ALL.len());
        assert_eq!(summary.distinct_water_points, 2);
        assert_eq!(summary.first_submission.as_deref(), Some("2023-03-20"));
        assert_eq!(summary.last_submission.as_deref(), Some("2023-04-02"));
    }

    #[test]
    fn empty_table() {
        let summary = summarize(&[]);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.first_submission, None);
    }
}
