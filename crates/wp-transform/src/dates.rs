//! Date normalization for `submission_date` and `sample_date`.
//!
//! Values stay strings. Recognized inputs are rewritten as ISO 8601 calendar
//! dates; the wall-clock date is kept as recorded, without timezone
//! conversion. Unrecognized values are left verbatim and reported.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;
use wp_model::{Column, WaterPointRecord};

/// Output representation of normalized dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

const MAX_SAMPLES: usize = 5;

/// Outcome of [`normalize_dates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateOutcome {
    /// Values rewritten to a different string.
    pub rewritten: usize,
    /// Values already in the output representation.
    pub unchanged: usize,
    /// Values in no recognized form, left verbatim.
    pub unparsed: usize,
    /// A few unparsed values for the operator.
    pub samples: Vec<String>,
}

/// Normalize a single date value, `None` when the form is not recognized.
pub fn normalize_date_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(format_date(parsed.naive_local().date()));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(format_date(parsed.naive_local().date()));
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(format_date(parsed.date()));
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(format_date)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Normalize both date columns in place.
pub fn normalize_dates(records: &mut [WaterPointRecord]) -> DateOutcome {
    let mut outcome = DateOutcome::default();
    for record in records.iter_mut() {
        let row = record.source_row;
        for column in [Column::SubmissionDate, Column::SampleDate] {
            let Some(Some(value)) = record.text_slot_mut(column) else {
                continue;
            };
            match normalize_date_text(value) {
                Some(normalized) if normalized == *value => outcome.unchanged += 1,
                Some(normalized) => {
                    *value = normalized;
                    outcome.rewritten += 1;
                }
                None => {
                    warn!(row, column = %column, value = %value, "unrecognized date left as is");
                    outcome.unparsed += 1;
                    if outcome.samples.len() < MAX_SAMPLES {
                        outcome.samples.push(value.clone());
                    }
                }
            }
        }
    }
    outcome
}
