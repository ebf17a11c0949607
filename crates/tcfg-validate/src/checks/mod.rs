//! Validation checks.
//!
//! Each submodule provides one stage of the check pipeline. Stages never stop
//! at the first finding; every stage returns all issues it sees.

pub mod schema;
pub mod sinks;
pub mod targets;
pub mod uniqueness;

use tcfg_ingest::{CsvRow, CsvTable};

use crate::issue::{FieldFault, Issue};
use crate::kind::DatasetKind;

/// Run the per-row checks for `kind` over every record.
pub fn check_rows(table: &CsvTable, kind: DatasetKind) -> Vec<Issue> {
    let check_row: fn(&CsvTable, &CsvRow) -> Vec<FieldFault> = match kind {
        DatasetKind::Targets => targets::check_row,
        DatasetKind::Sinks => sinks::check_row,
    };

    let mut issues = Vec::new();
    for row in table.rows() {
        let faults = check_row(table, row);
        if faults.is_empty() {
            continue;
        }
        tracing::debug!(
            line = row.line(),
            columns = ?faults.iter().map(FieldFault::column).collect::<Vec<_>>(),
            "row failed field checks"
        );
        issues.push(Issue::InvalidRow {
            line: row.line(),
            faults,
        });
    }
    issues
}
