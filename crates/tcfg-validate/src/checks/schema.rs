//! Required column presence.

use tcfg_ingest::CsvTable;

use crate::issue::Issue;

/// Report each required column missing from the header, in declaration order.
pub fn check(table: &CsvTable, required: &[&'static str]) -> Vec<Issue> {
    required
        .iter()
        .copied()
        .filter(|column| !table.has_column(column))
        .map(|column| Issue::MissingColumn { column })
        .collect()
}
