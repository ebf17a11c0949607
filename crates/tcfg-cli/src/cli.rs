//! CLI argument definitions for the configuration tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tcfg_publish::DEFAULT_WRANGLER_PROGRAM;
use tcfg_validate::DatasetKind;

#[derive(Parser)]
#[command(
    name = "tcfg",
    version,
    about = "Validate and publish notification target configuration",
    long_about = "Validate notification target and sink CSV files, then publish them\n\
                  as JSON to the key-value store read by the notification worker."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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
    /// Validate a configuration CSV file.
    Validate(ValidateArgs),

    /// Publish targets.csv and sinks.csv to the key-value store.
    Upload(UploadArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the CSV file to validate.
    #[arg(value_name = "CSV_FILE")]
    pub source: PathBuf,

    /// Schema file. Accepted for compatibility, currently not read.
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema: Option<PathBuf>,

    /// Which rule set to apply.
    #[arg(long = "kind", value_enum, default_value = "targets")]
    pub kind: KindArg,
}

#[derive(Parser)]
pub struct UploadArgs {
    /// Print what would be uploaded without writing to the store.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Only upload targets.csv.
    #[arg(long = "targets-only")]
    pub targets_only: bool,

    /// Only upload sinks.csv.
    #[arg(long = "sinks-only")]
    pub sinks_only: bool,

    /// Do not check that the wrangler CLI is installed.
    #[arg(long = "skip-wrangler-check")]
    pub skip_wrangler_check: bool,

    /// Directory holding targets.csv and sinks.csv.
    #[arg(long = "config-dir", value_name = "DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// Directory for temporary payload files.
    #[arg(long = "work-dir", value_name = "DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// wrangler executable to run.
    #[arg(
        long = "wrangler",
        value_name = "BIN",
        env = "WRANGLER_BIN",
        default_value = DEFAULT_WRANGLER_PROGRAM
    )]
    pub wrangler: String,
}

/// Rule set selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Targets,
    Sinks,
}

impl From<KindArg> for DatasetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Targets => DatasetKind::Targets,
            KindArg::Sinks => DatasetKind::Sinks,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults_to_targets() {
        let cli = Cli::try_parse_from(["tcfg", "validate", "config/targets.csv"]).unwrap();
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.source, PathBuf::from("config/targets.csv"));
        assert!(args.schema.is_none());
        assert_eq!(args.kind, KindArg::Targets);
    }

    #[test]
    fn test_upload_flags() {
        let cli = Cli::try_parse_from([
            "tcfg",
            "upload",
            "--dry-run",
            "--sinks-only",
            "--config-dir",
            "cfg",
            "--wrangler",
            "/opt/wrangler",
        ])
        .unwrap();
        let Command::Upload(args) = cli.command else {
            panic!("expected upload");
        };
        assert!(args.dry_run);
        assert!(args.sinks_only);
        assert!(!args.targets_only);
        assert_eq!(args.config_dir, PathBuf::from("cfg"));
        assert_eq!(args.work_dir, PathBuf::from("."));
        assert_eq!(args.wrangler, "/opt/wrangler");
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
