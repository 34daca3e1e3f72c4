//! Configuration options for the cleaning pipeline.
//!
//! There is no configuration file: the defaults below are the fixed policy,
//! and the CLI may override individual values.

use serde::{Deserialize, Serialize};

/// pH readings confirmed as sensor/entry artifacts.
pub const DEFAULT_PH_DENYLIST: [f64; 2] = [0.68, 0.73];

/// WHATWG label of the encoding used to re-decode mis-encoded exports.
pub const DEFAULT_LEGACY_ENCODING: &str = "windows-1252";

/// Dataset name used for export file stems and the spreadsheet sheet.
pub const DEFAULT_DATASET_NAME: &str = "waterpoints";

/// Inclusive advisory bounds. Values outside are flagged, never altered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeThresholds {
    pub ph_min: f64,
    pub ph_max: f64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub ecoli_min: f64,
    pub latitude_abs_max: f64,
    pub longitude_abs_max: f64,
}

impl Default for RangeThresholds {
    fn default() -> Self {
        Self {
            ph_min: 4.0,
            ph_max: 10.0,
            temperature_min_c: 0.0,
            temperature_max_c: 45.0,
            ecoli_min: 0.0,
            latitude_abs_max: 90.0,
            longitude_abs_max: 180.0,
        }
    }
}

/// Options controlling a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningOptions {
    /// Dataset name; exports are written as `<name>.arrow|csv|xlsx`.
    pub dataset_name: String,

    /// pH values nulled on exact match.
    pub ph_denylist: Vec<f64>,

    /// Encoding label used when any text field is not valid UTF-8.
    pub legacy_encoding: String,

    pub thresholds: RangeThresholds,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            ph_denylist: DEFAULT_PH_DENYLIST.to_vec(),
            legacy_encoding: DEFAULT_LEGACY_ENCODING.to_string(),
            thresholds: RangeThresholds::default(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dataset_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_name = name.into();
        self
    }

    /// Replace the pH denylist. An empty list keeps the default.
    #[must_use]
    pub fn with_ph_denylist(mut self, values: Vec<f64>) -> Self {
        if !values.is_empty() {
            self.ph_denylist = values;
        }
        self
    }

    #[must_use]
    pub fn with_legacy_encoding(mut self, label: impl Into<String>) -> Self {
        self.legacy_encoding = label.into();
        self
    }

    /// File name of the CSV export, as referenced by the data dictionary.
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.dataset_name)
    }
}
