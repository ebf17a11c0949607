//! Cross-record `(tenant_id, company_name)` uniqueness.

use std::collections::HashSet;

use tcfg_ingest::CsvTable;

use crate::issue::Issue;

/// Report every record whose pair already appeared earlier in the file.
///
/// Comparison is exact: no trimming and no case folding. The first
/// occurrence is canonical and never reported.
pub fn check(table: &CsvTable) -> Vec<Issue> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut issues = Vec::new();

    for row in table.rows() {
        let tenant_id = table.value_or_empty(row, "tenant_id");
        let company_name = table.value_or_empty(row, "company_name");
        if !seen.insert((tenant_id, company_name)) {
            issues.push(Issue::DuplicatePair {
                line: row.line(),
                tenant_id: tenant_id.to_string(),
                company_name: company_name.to_string(),
            });
        }
    }

    issues
}
