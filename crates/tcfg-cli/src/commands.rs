use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use tcfg_publish::{
    Dataset, KvSink, NamespaceConfig, ProcessEnv, PublishSummary, Publisher, WranglerSink,
    detect_wrangler,
};
use tcfg_validate::{ValidationReport, validate_file};

use crate::cli::{UploadArgs, ValidateArgs};

pub fn run_validate(args: &ValidateArgs) -> ValidationReport {
    if let Some(schema) = &args.schema {
        debug!(schema = %schema.display(), "schema file is not read");
    }
    validate_file(&args.source, args.kind.into())
}

/// Print the report the way CI jobs expect it on stdout.
pub fn write_validation_report<W: Write>(report: &ValidationReport, out: &mut W) -> io::Result<()> {
    if report.is_valid() {
        writeln!(out, "CSV validation passed: no errors found.")?;
        return Ok(());
    }
    writeln!(out, "Validation errors:")?;
    for message in report.messages() {
        writeln!(out, "  - {message}")?;
    }
    Ok(())
}

/// Datasets selected by the `--targets-only` / `--sinks-only` flags.
///
/// Passing both flags selects nothing.
pub fn selected_datasets(args: &UploadArgs) -> Vec<Dataset> {
    let mut datasets = Vec::new();
    if !args.sinks_only {
        datasets.push(Dataset::targets(&args.config_dir));
    }
    if !args.targets_only {
        datasets.push(Dataset::sinks(&args.config_dir));
    }
    datasets
}

pub fn run_upload(args: &UploadArgs) -> Result<PublishSummary> {
    if !args.skip_wrangler_check && !detect_wrangler(&args.wrangler) {
        bail!(
            "wrangler CLI not found. Install it with `npm install -g wrangler` \
             or pass --wrangler <BIN>"
        );
    }
    let namespaces = NamespaceConfig::new(ProcessEnv);
    let sink = WranglerSink::new(&args.wrangler, &args.work_dir).with_run_dir(home_dir());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    upload_with(args, &namespaces, sink, &mut out)
}

/// Publish the selected datasets through `sink`, writing progress to `out`.
pub fn upload_with<S: KvSink, W: Write>(
    args: &UploadArgs,
    namespaces: &NamespaceConfig,
    sink: S,
    out: &mut W,
) -> Result<PublishSummary> {
    let span = info_span!("upload", dry_run = args.dry_run);
    let _guard = span.enter();

    let datasets = selected_datasets(args);
    info!(datasets = datasets.len(), "starting configuration upload");
    let summary = Publisher::new(namespaces, sink)
        .with_dry_run(args.dry_run)
        .publish_all(&datasets, out)
        .context("publish configuration")?;
    info!(
        datasets = summary.outcomes.len(),
        failed = summary.failed().count(),
        "configuration upload finished"
    );
    Ok(summary)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}
