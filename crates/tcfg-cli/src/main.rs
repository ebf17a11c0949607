//! Notification configuration CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tcfg_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use tcfg_cli::commands::{run_upload, run_validate, write_validation_report};
use tcfg_cli::logging::{LogConfig, LogFormat, init_logging};
use tcfg_cli::summary::print_upload_summary;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => {
            let report = run_validate(&args);
            if let Err(error) = write_validation_report(&report, &mut io::stdout().lock()) {
                eprintln!("error: {error}");
                1
            } else if report.is_valid() {
                0
            } else {
                1
            }
        }
        Command::Upload(args) => match run_upload(&args) {
            Ok(summary) => {
                print_upload_summary(&summary, args.dry_run);
                if summary.success() { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("Error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
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
    LogConfig::default()
        .with_level(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_ansi(with_ansi)
}
