use std::path::PathBuf;

use serde::Serialize;
use wp_model::WaterPointRecord;
use wp_output::{ArtifactCheck, ExportPaths};
use wp_validate::{DatasetSummary, DictionaryIssue, ValidationReport};

/// Per-stage counts of a cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub input_rows: usize,
    pub input_columns: usize,
    pub ignored_columns: Vec<String>,
    /// Raw data rows dropped for a missing latitude or longitude.
    pub dropped_rows: Vec<usize>,
    pub ph_nulled: usize,
    pub invalid_text_fields: usize,
    /// Encoding used to re-decode text, when any field was not UTF-8.
    pub reencoded_from: Option<String>,
    pub dropped_chars: usize,
    pub units_fixed: usize,
    pub dates_rewritten: usize,
    pub dates_unparsed: usize,
    pub unparsed_date_samples: Vec<String>,
}

impl StageCounts {
    pub fn dropped(&self) -> usize {
        self.dropped_rows.len()
    }
}

/// Result of one `clean` run; serialized as the JSON run report.
#[derive(Debug, Serialize)]
pub struct CleanResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dataset_name: String,
    pub counts: StageCounts,
    pub summary: DatasetSummary,
    pub validation: ValidationReport,
    /// `None` when no dictionary was supplied.
    pub dictionary_issues: Option<Vec<DictionaryIssue>>,
    /// `None` on a dry run.
    pub outputs: Option<ExportPaths>,
    pub verified: Vec<ArtifactCheck>,
    #[serde(skip)]
    pub records: Vec<WaterPointRecord>,
}

impl CleanResult {
    pub fn dictionary_issue_count(&self) -> usize {
        self.dictionary_issues.as_ref().map_or(0, Vec::len)
    }
}
