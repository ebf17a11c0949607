//! [`KvSink`] backed by the `wrangler` CLI.
//!
//! Each write stages the payload in a temporary JSON file under the work
//! directory, runs `wrangler kv key put --remote` against it and removes the
//! file again whatever the outcome.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::SinkError;
use crate::sink::KvSink;

/// Default program name looked up on `PATH`.
pub const DEFAULT_WRANGLER_PROGRAM: &str = "wrangler";

/// Runs `wrangler kv key put` for every write.
#[derive(Debug, Clone)]
pub struct WranglerSink {
    program: String,
    work_dir: PathBuf,
    run_dir: Option<PathBuf>,
}

impl WranglerSink {
    /// Sink staging payload files in `work_dir`.
    pub fn new(program: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
            run_dir: None,
        }
    }

    /// Directory the tool is started in, so it does not pick up a project
    /// `wrangler.toml`. Usually the user's home directory.
    #[must_use]
    pub fn with_run_dir(mut self, run_dir: Option<PathBuf>) -> Self {
        self.run_dir = run_dir;
        self
    }

    /// Temporary payload location for `key`.
    pub fn payload_path(&self, key: &str) -> PathBuf {
        payload_path(&self.work_dir, key)
    }

    fn put(&self, namespace_id: &str, key: &str, payload_file: &Path) -> Result<(), SinkError> {
        let mut command = Command::new(&self.program);
        command
            .args(["kv", "key", "put", "--remote", "--config=/dev/null"])
            .arg(format!("--namespace-id={namespace_id}"))
            .arg(key)
            .arg(format!("--path={}", payload_file.display()));
        if let Some(dir) = &self.run_dir {
            command.current_dir(dir);
        }

        tracing::info!(
            program = %self.program,
            namespace_id,
            key,
            path = %payload_file.display(),
            "running store write"
        );
        let output = command.output().map_err(|source| SinkError::Launch {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::error!(
            status = ?output.status.code(),
            stderr = %stderr.trim(),
            "store write failed"
        );
        Err(SinkError::Rejected {
            status: output.status.code(),
            stdout,
            stderr,
        })
    }
}

impl Default for WranglerSink {
    fn default() -> Self {
        Self::new(DEFAULT_WRANGLER_PROGRAM, ".")
    }
}

impl KvSink for WranglerSink {
    fn write(&self, namespace_id: &str, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        let staged = self.payload_path(key);
        // The tool runs in another directory, so hand it an absolute path.
        let staged = std::path::absolute(&staged).unwrap_or(staged);
        fs::write(&staged, payload).map_err(|source| SinkError::PayloadFile {
            path: staged.clone(),
            source,
        })?;
        tracing::debug!(path = %staged.display(), bytes = payload.len(), "staged payload file");

        let result = self.put(namespace_id, key, &staged);

        if let Err(error) = fs::remove_file(&staged) {
            tracing::warn!(path = %staged.display(), %error, "failed to remove payload file");
        }
        result
    }
}

/// `<work_dir>/temp_<key>.json` with `:` in the key replaced by `_`.
pub fn payload_path(work_dir: &Path, key: &str) -> PathBuf {
    let safe_key = key.replace(':', "_");
    work_dir.join(format!("temp_{safe_key}.json"))
}

/// Returns true if `<program> --version` runs and exits successfully.
pub fn detect_wrangler(program: &str) -> bool {
    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            tracing::debug!(program, version = %version.trim(), "store tool detected");
            true
        }
        Ok(output) => {
            tracing::debug!(program, status = ?output.status.code(), "store tool check failed");
            false
        }
        Err(error) => {
            tracing::debug!(program, %error, "store tool not runnable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_path_replaces_colons() {
        assert_eq!(
            payload_path(Path::new("/work"), "targets:active"),
            PathBuf::from("/work/temp_targets_active.json")
        );
    }

    #[test]
    fn test_missing_program_is_not_detected() {
        assert!(!detect_wrangler("tcfg-definitely-not-installed-tool"));
    }

    #[test]
    fn test_launch_failure_removes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let sink = WranglerSink::new("tcfg-definitely-not-installed-tool", dir.path());

        let result = sink.write("ns", "targets:active", b"[]");

        assert!(matches!(result, Err(SinkError::Launch { .. })));
        assert!(!sink.payload_path("targets:active").exists());
    }
}
