//! Dataset dispatch to the key-value store.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use crate::error::{Result, SinkError};
use crate::namespace::NamespaceConfig;
use crate::normalize::{NormalizedRecord, load_and_normalize};
use crate::sink::KvSink;

/// Number of records shown in a dry-run preview.
pub const PREVIEW_RECORDS: usize = 2;

/// A named configuration file and where it is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub source: PathBuf,
    pub key: String,
    pub binding: String,
}

impl Dataset {
    /// `<config_dir>/targets.csv` published to `targets:active`.
    pub fn targets(config_dir: &Path) -> Self {
        Self {
            name: "targets".to_string(),
            source: config_dir.join("targets.csv"),
            key: "targets:active".to_string(),
            binding: "TARGETS".to_string(),
        }
    }

    /// `<config_dir>/sinks.csv` published to `sinks:active` in the same
    /// namespace as targets.
    pub fn sinks(config_dir: &Path) -> Self {
        Self {
            name: "sinks".to_string(),
            source: config_dir.join("sinks.csv"),
            key: "sinks:active".to_string(),
            binding: "TARGETS".to_string(),
        }
    }
}

/// Result of dispatching one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Dry run: the payload was previewed, nothing was written.
    Previewed,
    Uploaded,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOutcome {
    pub name: String,
    pub key: String,
    pub records: usize,
    pub status: DispatchStatus,
}

impl DatasetOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self.status, DispatchStatus::Failed { .. })
    }
}

/// Outcomes of every dataset attempted in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub outcomes: Vec<DatasetOutcome>,
}

impl PublishSummary {
    /// True when every attempted dataset succeeded (vacuously true if none).
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(DatasetOutcome::succeeded)
    }

    pub fn failed(&self) -> impl Iterator<Item = &DatasetOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }
}

/// Publishes datasets through a [`KvSink`] using an explicit namespace config.
///
/// Progress lines are written to the caller's writer so the CLI can send them
/// to stdout and tests can capture them.
pub struct Publisher<'a, S: KvSink> {
    namespaces: &'a NamespaceConfig,
    sink: S,
    dry_run: bool,
}

impl<'a, S: KvSink> Publisher<'a, S> {
    pub fn new(namespaces: &'a NamespaceConfig, sink: S) -> Self {
        Self {
            namespaces,
            sink,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Load, normalize and dispatch each dataset in order.
    ///
    /// A missing or unparseable source aborts the run with an error. A failed
    /// dispatch is recorded and the next dataset still runs.
    pub fn publish_all<W: Write>(
        &self,
        datasets: &[Dataset],
        out: &mut W,
    ) -> Result<PublishSummary> {
        let mut summary = PublishSummary::default();
        for dataset in datasets {
            writeln!(out, "Processing {}...", dataset.source.display())?;
            let records = load_and_normalize(&dataset.source)?;
            let outcome = self.publish_dataset(dataset, &records, out)?;
            summary.outcomes.push(outcome);
        }
        Ok(summary)
    }

    /// Dispatch already normalized records for one dataset.
    pub fn publish_dataset<W: Write>(
        &self,
        dataset: &Dataset,
        records: &[NormalizedRecord],
        out: &mut W,
    ) -> Result<DatasetOutcome> {
        let span = info_span!("publish", dataset = %dataset.name, key = %dataset.key);
        let _guard = span.enter();

        let status = if self.dry_run {
            self.preview(dataset, records, out)?
        } else {
            self.upload(dataset, records, out)?
        };

        Ok(DatasetOutcome {
            name: dataset.name.clone(),
            key: dataset.key.clone(),
            records: records.len(),
            status,
        })
    }

    fn preview<W: Write>(
        &self,
        dataset: &Dataset,
        records: &[NormalizedRecord],
        out: &mut W,
    ) -> Result<DispatchStatus> {
        writeln!(
            out,
            "[DRY RUN] Would upload to KV key '{}' with {} items",
            dataset.key,
            records.len()
        )?;
        let head = &records[..records.len().min(PREVIEW_RECORDS)];
        match serde_json::to_string_pretty(head) {
            Ok(preview) => writeln!(out, "Data preview: {preview}")?,
            Err(error) => {
                return Ok(DispatchStatus::Failed {
                    reason: format!("failed to serialize preview: {error}"),
                });
            }
        }
        Ok(DispatchStatus::Previewed)
    }

    fn upload<W: Write>(
        &self,
        dataset: &Dataset,
        records: &[NormalizedRecord],
        out: &mut W,
    ) -> Result<DispatchStatus> {
        let namespace_id = match self.namespaces.resolve(&dataset.binding) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "namespace resolution failed");
                writeln!(out, "Error: {error}")?;
                return Ok(DispatchStatus::Failed {
                    reason: error.to_string(),
                });
            }
        };

        let payload = match serde_json::to_string_pretty(records) {
            Ok(payload) => payload,
            Err(error) => {
                return Ok(DispatchStatus::Failed {
                    reason: format!("failed to serialize payload: {error}"),
                });
            }
        };

        writeln!(out, "Data to upload: {} items", records.len())?;
        match self
            .sink
            .write(&namespace_id, &dataset.key, payload.as_bytes())
        {
            Ok(()) => {
                info!(records = records.len(), "dataset uploaded");
                writeln!(
                    out,
                    "Successfully uploaded {} items to KV key '{}'",
                    records.len(),
                    dataset.key
                )?;
                Ok(DispatchStatus::Uploaded)
            }
            Err(error) => {
                warn!(%error, "dataset upload failed");
                writeln!(out, "Failed to upload to KV key '{}': {error}", dataset.key)?;
                if let SinkError::Rejected { stdout, stderr, .. } = &error {
                    if !stdout.trim().is_empty() {
                        writeln!(out, "{}", stdout.trim_end())?;
                    }
                    if !stderr.trim().is_empty() {
                        writeln!(out, "Error: {}", stderr.trim_end())?;
                    }
                }
                Ok(DispatchStatus::Failed {
                    reason: error.to_string(),
                })
            }
        }
    }
}
