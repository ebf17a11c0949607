//! Error types for publishing.

use std::path::PathBuf;
use thiserror::Error;

use tcfg_ingest::IngestError;

/// Errors that abort a publish run.
///
/// Per-dataset dispatch failures are not errors at this level; they are
/// recorded in [`crate::DatasetOutcome`] so sibling datasets still run.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The source CSV is missing or unparseable.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Writing progress output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors raised while resolving a namespace binding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    /// Neither an override nor a default exists for the binding.
    #[error("no namespace id for binding {binding}; set {env_key}")]
    UnknownBinding { binding: String, env_key: String },
}

/// Errors reported by a [`crate::KvSink`] write.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The temporary payload file could not be written.
    #[error("failed to write payload file {path}: {source}")]
    PayloadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store tool could not be started.
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The store tool ran and reported failure.
    #[error("store write exited with {}", describe_status(.status))]
    Rejected {
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Result type for publishing operations.
pub type Result<T> = std::result::Result<T, PublishError>;
