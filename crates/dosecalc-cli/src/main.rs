//! Dosing calculator CLI.

use clap::{ColorChoice, Parser};
use dosecalc_cli::logging::{LogConfig, LogFormat, init_logging};
use dosecalc_cli::settings::{OutputFormat, load_settings, load_settings_for_init};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{build_inputs, run_batch_file, run_calculator, run_config, run_table};

/// Exit status when a calculator produced no value.
const EXIT_NO_RESULT: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let loaded = match &cli.command {
        Command::Config(args) if args.init => load_settings_for_init(cli.config.as_deref()),
        _ => load_settings(cli.config.as_deref()),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {:#}", anyhow::Error::new(error));
            std::process::exit(1);
        }
    };
    let format: OutputFormat = cli
        .output
        .map_or(settings.output.format, OutputFormat::from);

    let exit_code = match &cli.command {
        Command::Table(args) => report(run_table(args, format)),
        Command::Batch(args) => report(run_batch_file(args, &settings, format).map(|_| ())),
        Command::Config(args) => report(run_config(args, &settings, cli.config.as_deref())),
        command => match (command.calculator_kind(), build_inputs(command, &settings)) {
            (Some(kind), Some(inputs)) => match run_calculator(kind, &inputs, format) {
                Ok(result) if result.numeric_value().is_some() => 0,
                Ok(_) => EXIT_NO_RESULT,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            },
            _ => 1,
        },
    };
    std::process::exit(exit_code);
}

fn report(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        ..LogConfig::default()
    }
    .with_format(format)
    .with_log_file(cli.log_file.clone())
    .with_log_data(cli.log_data)
    .with_ansi(with_ansi);
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_for(args: &[&str]) -> LogConfig {
        log_config_from_cli(&Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = config_for(&["dosecalc", "table"]);
        assert!(config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.log_data);
    }

    #[test]
    fn explicit_level_wins_over_verbosity() {
        let config = config_for(&["dosecalc", "-v", "table", "--log-level", "trace"]);
        assert!(!config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::TRACE);
    }

    #[test]
    fn verbosity_disables_rust_log() {
        let config = config_for(&["dosecalc", "-vv", "table"]);
        assert!(!config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
    }

    #[test]
    fn output_flags_flow_into_config() {
        let config = config_for(&[
            "dosecalc",
            "--color",
            "always",
            "table",
            "--log-format",
            "json",
            "--log-file",
            "dosecalc.log",
            "--log-data",
        ]);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file, Some(PathBuf::from("dosecalc.log")));
        assert!(config.log_data);
        assert!(config.with_ansi);
    }
}
