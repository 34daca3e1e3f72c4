use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{CellAlignment, Table};
use tracing::{info, info_span};

use wp_cli::pipeline::{PipelineConfig, run_pipeline};
use wp_cli::types::CleanResult;
use wp_model::{CleaningOptions, DataDictionary};
use wp_output::write_dictionary_csv;

use crate::cli::{CleanArgs, DictionaryArgs};
use crate::summary::{align_column, apply_table_style, header_cell};

pub fn run_dictionary(args: &DictionaryArgs) -> Result<()> {
    let options = CleaningOptions::new().with_dataset_name(args.name.clone());
    let dictionary = DataDictionary::from_schema(&options.csv_file_name());

    if let Some(path) = &args.output {
        write_dictionary_csv(&dictionary, path)?;
        println!("Dictionary: {}", path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Directory"),
        header_cell("File"),
        header_cell("Variable"),
        header_cell("Type"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for entry in dictionary.entries {
        table.add_row(vec![
            entry.directory,
            entry.file_name,
            entry.variable_name,
            entry.variable_type,
            entry.description,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", input = %args.input.display(), dataset = %args.name);
    let _guard = span.enter();
    let start = Instant::now();

    let options = CleaningOptions::new()
        .with_dataset_name(args.name.clone())
        .with_ph_denylist(args.ph_deny.clone())
        .with_legacy_encoding(args.legacy_encoding.clone());
    let mut config = PipelineConfig::new(&args.input)
        .with_options(options)
        .with_dictionary(args.dictionary.clone())
        .with_dry_run(args.dry_run);
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }

    let result = run_pipeline(&config)?;
    if let Some(path) = &args.report {
        write_report(&result, path)?;
    }
    info!(
        rows = result.summary.rows,
        flags = result.validation.flags.len(),
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    Ok(result)
}

fn write_report(result: &CleanResult, path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(result).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}
