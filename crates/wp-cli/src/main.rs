//! Water point dataset cleaner CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use wp_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_clean, run_dictionary};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Clean(args) => match run_clean(args) {
            Ok(result) => {
                print_summary(&result);
                let issues = result.dictionary_issue_count();
                if args.strict_dictionary && issues > 0 {
                    eprintln!("error: {issues} data dictionary issue(s) with --strict-dictionary");
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Dictionary(args) => match run_dictionary(args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Logging setup from the global flags.
///
/// `--log-level` wins over `-v/-q`; `RUST_LOG` applies only when neither is given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: explicit_level.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit_level.is_none() && !cli.verbosity.is_present(),
        with_ansi,
        format: LogFormat::from(cli.log_format),
        log_file: cli.log_file.clone(),
        ..LogConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> LogConfig {
        let mut argv = vec!["waterpoint-cleaner"];
        argv.extend_from_slice(args);
        argv.push("dictionary");
        log_config_from_cli(&Cli::parse_from(argv))
    }

    #[test]
    fn stage_progress_is_visible_by_default() {
        let config = config(&[]);
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn quiet_drops_to_warnings() {
        let config = config(&["-q"]);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn explicit_level_overrides_verbosity() {
        let config = config(&["-v", "--log-level", "error", "--log-format", "json"]);
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
    }
}
