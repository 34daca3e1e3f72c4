//! Staged cleaning pipeline.
//!
//! The record vector is owned by [`run_pipeline`] and moved from stage to
//! stage. Each stage runs inside its own `stage` span and logs its counts.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use wp_ingest::{RawTable, read_dictionary, read_raw_table};
use wp_model::{CleaningOptions, DataDictionary, WaterPointRecord};
use wp_output::{verify_exports, write_exports};
use wp_transform::{
    filter_missing_coordinates, fix_conductivity_unit, normalize_dates, normalize_encoding,
    null_denylisted_ph, resolve_encoding,
};
use wp_validate::{check_dictionary, summarize, validate_ranges};

use crate::types::{CleanResult, StageCounts};

/// Inputs of one cleaning run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub options: CleaningOptions,
    pub dictionary: Option<PathBuf>,
    /// Run every stage except export and verification.
    pub dry_run: bool,
}

impl PipelineConfig {
    /// Defaults: `<input dir>/output`, built-in options, no dictionary.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output_dir = default_output_dir(&input);
        Self {
            input,
            output_dir,
            options: CleaningOptions::default(),
            dictionary: None,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: CleaningOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_dictionary(mut self, path: Option<PathBuf>) -> Self {
        self.dictionary = path;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// `output` next to the input file.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("output")
}

/// Run every stage against `config.input`.
pub fn run_pipeline(config: &PipelineConfig) -> Result<CleanResult> {
    let options = &config.options;
    let legacy = resolve_encoding(&options.legacy_encoding)?;
    let dictionary = config
        .dictionary
        .as_deref()
        .map(|path| {
            read_dictionary(path).with_context(|| format!("load dictionary {}", path.display()))
        })
        .transpose()?;

    let table = timed("load", || read_raw_table(&config.input))?;
    let mut counts = StageCounts {
        input_rows: table.row_count(),
        input_columns: table.column_count(),
        ignored_columns: table.ignored_columns.clone(),
        ..StageCounts::default()
    };
    info!(
        path = %table.path.display(),
        rows = counts.input_rows,
        columns = counts.input_columns,
        "raw table loaded"
    );

    let mut records = timed("clean", || clean_records(table, options, legacy, &mut counts));

    let validation = timed("validate", || validate_ranges(&records, &options.thresholds));
    info!(
        flags = validation.flags.len(),
        ph_min = validation.ph.map(|range| range.min),
        ph_max = validation.ph.map(|range| range.max),
        temperature_min = validation.temperature.map(|range| range.min),
        temperature_max = validation.temperature.map(|range| range.max),
        "range validation complete"
    );

    let dates = timed("dates", || normalize_dates(&mut records));
    counts.dates_rewritten = dates.rewritten;
    counts.dates_unparsed = dates.unparsed;
    counts.unparsed_date_samples = dates.samples;

    let summary = summarize(&records);
    info!(
        rows = summary.rows,
        columns = summary.columns,
        water_points = summary.distinct_water_points,
        first_submission = summary.first_submission.as_deref().unwrap_or(""),
        last_submission = summary.last_submission.as_deref().unwrap_or(""),
        "summary"
    );

    let dictionary_issues = dictionary
        .as_ref()
        .map(|dictionary| check_dictionary_for(dictionary, options));

    let (outputs, verified) = if config.dry_run {
        info!("dry run; skipping export");
        (None, Vec::new())
    } else {
        let paths = timed("export", || {
            write_exports(&records, &config.output_dir, &options.dataset_name)
        })?;
        let verified = timed("verify", || verify_exports(&records, &paths))?;
        (Some(paths), verified)
    };

    Ok(CleanResult {
        input: config.input.clone(),
        output_dir: config.output_dir.clone(),
        dataset_name: options.dataset_name.clone(),
        counts,
        summary,
        validation,
        dictionary_issues,
        outputs,
        verified,
        records,
    })
}

/// Geo-filter, pH denylist, encoding normalization and the unit fix.
pub fn clean_records(
    table: RawTable,
    options: &CleaningOptions,
    legacy: &'static wp_transform::Encoding,
    counts: &mut StageCounts,
) -> Vec<WaterPointRecord> {
    let (mut raw, geo) = filter_missing_coordinates(table.records);
    info!(removed = geo.removed(), kept = raw.len(), "geo-filter complete");
    counts.dropped_rows = geo.removed_rows;

    counts.ph_nulled = null_denylisted_ph(&mut raw, &options.ph_denylist);
    info!(nulled = counts.ph_nulled, denylist = ?options.ph_denylist, "pH corrections applied");

    let (mut records, encoding) = normalize_encoding(raw, legacy);
    counts.invalid_text_fields = encoding.invalid_fields;
    counts.dropped_chars = encoding.dropped_chars;
    if encoding.reencoded {
        counts.reencoded_from = Some(encoding.encoding.to_string());
        if encoding.dropped_chars > 0 {
            warn!(dropped = encoding.dropped_chars, "unmappable characters dropped");
        }
    }
    info!(
        invalid_fields = encoding.invalid_fields,
        reencoded = encoding.reencoded,
        "encoding normalized"
    );

    counts.units_fixed = fix_conductivity_unit(&mut records);
    info!(fixed = counts.units_fixed, "conductivity unit labels fixed");
    records
}

fn check_dictionary_for(
    dictionary: &DataDictionary,
    options: &CleaningOptions,
) -> Vec<wp_validate::DictionaryIssue> {
    let file_name = options.csv_file_name();
    let issues = check_dictionary(dictionary, &file_name);
    info!(file = %file_name, issues = issues.len(), "dictionary checked");
    issues
}

fn timed<T>(stage: &'static str, run: impl FnOnce() -> T) -> T {
    let span = info_span!("stage", stage);
    let start = Instant::now();
    let output = span.in_scope(run);
    debug!(stage, duration_ms = start.elapsed().as_millis(), "stage complete");
    output
}
