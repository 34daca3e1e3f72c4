//! Advisory findings: range flags and dictionary issues.
//!
//! Nothing here rejects data. Flags point the operator at measurements worth
//! a second look; extreme but real values stay in the table.

use std::fmt;

use serde::{Deserialize, Serialize};
use wp_model::{Column, RangeThresholds};

/// Kind of range flag raised on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    PhOutOfRange,
    TemperatureOutOfRange,
    NegativeEcoli,
    LatitudeOutOfRange,
    LongitudeOutOfRange,
}

impl FlagKind {
    pub const ALL: [FlagKind; 5] = [
        FlagKind::PhOutOfRange,
        FlagKind::TemperatureOutOfRange,
        FlagKind::NegativeEcoli,
        FlagKind::LatitudeOutOfRange,
        FlagKind::LongitudeOutOfRange,
    ];

    /// Column the flag is raised on.
    pub fn column(&self) -> Column {
        match self {
            FlagKind::PhOutOfRange => Column::Ph,
            FlagKind::TemperatureOutOfRange => Column::TemperatureC,
            FlagKind::NegativeEcoli => Column::EcoliMpn100ml,
            FlagKind::LatitudeOutOfRange => Column::Latitude,
            FlagKind::LongitudeOutOfRange => Column::Longitude,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FlagKind::PhOutOfRange => "pH out of range",
            FlagKind::TemperatureOutOfRange => "temperature out of range",
            FlagKind::NegativeEcoli => "negative E. coli count",
            FlagKind::LatitudeOutOfRange => "latitude out of range",
            FlagKind::LongitudeOutOfRange => "longitude out of range",
        }
    }

    /// Expected range, as shown to the operator.
    pub fn expectation(&self, thresholds: &RangeThresholds) -> String {
        match self {
            FlagKind::PhOutOfRange => format!("{} to {}", thresholds.ph_min, thresholds.ph_max),
            FlagKind::TemperatureOutOfRange => format!(
                "{} to {} °C",
                thresholds.temperature_min_c, thresholds.temperature_max_c
            ),
            FlagKind::NegativeEcoli => format!(">= {}", thresholds.ecoli_min),
            FlagKind::LatitudeOutOfRange => format!(
                "{} to {}",
                -thresholds.latitude_abs_max, thresholds.latitude_abs_max
            ),
            FlagKind::LongitudeOutOfRange => format!(
                "{} to {}",
                -thresholds.longitude_abs_max, thresholds.longitude_abs_max
            ),
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value outside its advisory range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFlag {
    /// 1-based data row in the raw file.
    pub source_row: usize,
    pub water_point: Option<String>,
    pub kind: FlagKind,
    pub value: f64,
}

/// Mismatch between the data dictionary and the exported schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DictionaryIssue {
    /// The dictionary has no entries for the export file.
    NoEntries { file_name: String },
    /// An exported column has no dictionary entry.
    Undocumented { column: String },
    /// A dictionary entry names a column that is not exported.
    UnknownVariable { variable: String },
    /// A column is documented more than once.
    DuplicateEntry { variable: String, count: usize },
    /// The documented type disagrees with the column kind.
    TypeMismatch {
        variable: String,
        expected: String,
        found: String,
    },
}

impl DictionaryIssue {
    /// Variable the issue is about, when it concerns a single one.
    pub fn variable(&self) -> Option<&str> {
        match self {
            DictionaryIssue::NoEntries { .. } => None,
            DictionaryIssue::Undocumented { column } => Some(column),
            DictionaryIssue::UnknownVariable { variable }
            | DictionaryIssue::DuplicateEntry { variable, .. }
            | DictionaryIssue::TypeMismatch { variable, .. } => Some(variable),
        }
    }
}

impl fmt::Display for DictionaryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryIssue::NoEntries { file_name } => {
                write!(f, "dictionary has no entries for {file_name}")
            }
            DictionaryIssue::Undocumented { column } => {
                write!(f, "column {column} is not documented in the dictionary")
            }
            DictionaryIssue::UnknownVariable { variable } => {
                write!(f, "dictionary documents {variable}, which is not an exported column")
            }
            DictionaryIssue::DuplicateEntry { variable, count } => {
                write!(f, "{variable} is documented {count} times")
            }
            DictionaryIssue::TypeMismatch {
                variable,
                expected,
                found,
            } => write!(
                f,
                "{variable} is documented as {found} but exported as {expected}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_columns_are_numeric() {
        for kind in FlagKind::ALL {
            assert_eq!(kind.column().kind(), wp_model::ColumnKind::Numeric);
        }
    }

    #[test]
    fn expectations_use_thresholds() {
        let thresholds = RangeThresholds::default();
        assert_eq!(FlagKind::PhOutOfRange.expectation(&thresholds), "4 to 10");
        assert_eq!(
            FlagKind::TemperatureOutOfRange.expectation(&thresholds),
            "0 to 45 °C"
        );
        assert_eq!(FlagKind::LatitudeOutOfRange.expectation(&thresholds), "-90 to 90");
    }

    #[test]
    fn dictionary_issue_messages() {
        insta::assert_snapshot!(
            DictionaryIssue::Undocumented { column: "ph".into() }.to_string(),
            @"column ph is not documented in the dictionary"
        );
        insta::assert_snapshot!(
            DictionaryIssue::TypeMismatch {
                variable: "latitude".into(),
                expected: "numeric".into(),
                found: "character".into(),
            }
            .to_string(),
            @"latitude is documented as character but exported as numeric"
        );
    }

    #[test]
    fn report_json_shapes() {
        let flag = RangeFlag {
            source_row: 8,
            water_point: Some("WP-08".into()),
            kind: FlagKind::TemperatureOutOfRange,
            value: 46.0,
        };
        insta::assert_snapshot!(
            serde_json::to_string(&flag).unwrap(),
            @r#"{"source_row":8,"water_point":"WP-08","kind":"temperature_out_of_range","value":46.0}"#
        );
        insta::assert_snapshot!(
            serde_json::to_string(&DictionaryIssue::Undocumented { column: "ph".into() }).unwrap(),
            @r#"{"issue":"undocumented","column":"ph"}"#
        );
    }
}
