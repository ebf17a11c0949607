//! Validation for notification target configuration files.
//!
//! [`validate_file`] is the pre-flight gate run before a configuration is
//! published. It never fails: every finding, including a missing or
//! unreadable source, comes back as an [`Issue`] inside the
//! [`ValidationReport`]. An empty report means the file is safe to activate.
//!
//! Check order is fixed so repeated runs produce identical output:
//!
//! 1. source (missing, unreadable, empty) - stops validation
//! 2. schema (required columns)
//! 3. rows (field rules, one issue per faulty record)
//! 4. uniqueness (`(tenant_id, company_name)` pairs, targets only)

pub mod checks;
pub mod formats;
mod issue;
mod kind;

pub use issue::{FieldFault, Issue};
pub use kind::{DatasetKind, SINK_REQUIRED_COLUMNS, TARGET_REQUIRED_COLUMNS};

use std::path::Path;

use tcfg_ingest::{CsvTable, IngestError, read_csv_table};
use tracing::{info, info_span};

/// Ordered list of issues found in one configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues found.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// One rendered message per issue, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Validate the CSV file at `path` against the rules for `kind`.
pub fn validate_file(path: &Path, kind: DatasetKind) -> ValidationReport {
    let span = info_span!("validate", path = %path.display(), kind = %kind);
    let _guard = span.enter();

    let table = match read_csv_table(path) {
        Ok(table) => table,
        Err(error) => {
            let issue = source_issue(path, error);
            info!(issue = %issue, "validation stopped");
            return ValidationReport {
                issues: vec![issue],
            };
        }
    };

    if table.is_empty() {
        return ValidationReport {
            issues: vec![Issue::EmptySource {
                path: path.to_path_buf(),
            }],
        };
    }

    let report = validate_table(&table, kind);
    info!(
        rows = table.len(),
        issue_count = report.len(),
        "validation complete"
    );
    report
}

/// Run schema, row and uniqueness checks over an already loaded table.
///
/// The table is assumed to hold at least one record; an empty table simply
/// yields the schema findings.
pub fn validate_table(table: &CsvTable, kind: DatasetKind) -> ValidationReport {
    let mut issues = checks::schema::check(table, kind.required_columns());
    issues.extend(checks::check_rows(table, kind));
    if kind.requires_unique_pairs() {
        issues.extend(checks::uniqueness::check(table));
    }
    ValidationReport { issues }
}

fn source_issue(path: &Path, error: IngestError) -> Issue {
    match error {
        IngestError::FileNotFound { .. } => Issue::SourceNotFound {
            path: path.to_path_buf(),
        },
        IngestError::FileRead { source, .. } => Issue::SourceUnreadable {
            path: path.to_path_buf(),
            reason: source.to_string(),
        },
        IngestError::CsvParse { source, .. } => Issue::SourceUnreadable {
            path: path.to_path_buf(),
            reason: source.to_string(),
        },
    }
}
