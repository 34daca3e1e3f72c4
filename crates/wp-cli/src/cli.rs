//! CLI argument definitions for the water point cleaner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::level_filters::LevelFilter;
use wp_cli::logging::LogFormat;
use colorchoice_clap::Color;
use wp_model::{DEFAULT_DATASET_NAME, DEFAULT_LEGACY_ENCODING};

#[derive(Parser)]
#[command(
    name = "waterpoint-cleaner",
    version,
    about = "Clean a raw water point monitoring export",
    long_about = "Clean a raw water point monitoring export.\n\n\
                  Drops rows without coordinates, corrects known erroneous values,\n\
                  repairs text encoding, normalizes dates, flags out-of-range values,\n\
                  and writes the cleaned table as Arrow IPC, CSV, and XLSX."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a raw export and write the cleaned table.
    Clean(CleanArgs),

    /// Print or write the data dictionary of the cleaned table.
    Dictionary(DictionaryArgs),
}

#[derive(Args)]
pub struct CleanArgs {
    /// Raw delimited export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Dataset name, used as the export file stem and sheet name.
    #[arg(long = "name", value_name = "NAME", default_value = DEFAULT_DATASET_NAME)]
    pub name: String,

    /// pH value to null on exact match; repeat to list several.
    ///
    /// Replaces the built-in denylist (0.68, 0.73) when given.
    #[arg(long = "ph-deny", value_name = "VALUE")]
    pub ph_deny: Vec<f64>,

    /// Encoding label used to re-decode text that is not valid UTF-8.
    #[arg(
        long = "legacy-encoding",
        value_name = "LABEL",
        default_value = DEFAULT_LEGACY_ENCODING
    )]
    pub legacy_encoding: String,

    /// Data dictionary CSV to check against the exported columns.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Exit non-zero when the dictionary check reports any issue.
    #[arg(long = "strict-dictionary", requires = "dictionary")]
    pub strict_dictionary: bool,

    /// Write the run report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Run every stage but skip writing and verifying exports.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct DictionaryArgs {
    /// Dataset name the dictionary describes.
    #[arg(long = "name", value_name = "NAME", default_value = DEFAULT_DATASET_NAME)]
    pub name: String,

    /// Write the dictionary as CSV instead of printing it.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
