//! Field rules for `targets.csv` records.

use tcfg_ingest::{CsvRow, CsvTable};

use crate::formats::{is_boolean_token, is_valid_line_user_id, is_valid_twitter_id, is_valid_url};
use crate::issue::FieldFault;

/// Check one target record. Absent columns and short rows read as empty.
pub fn check_row(table: &CsvTable, row: &CsvRow) -> Vec<FieldFault> {
    let field = |column: &str| table.value_or_empty(row, column);
    let mut faults = Vec::new();

    if field("tenant_id").trim().is_empty() {
        faults.push(FieldFault::TenantIdEmpty);
    }
    if field("company_name").trim().is_empty() {
        faults.push(FieldFault::CompanyNameEmpty);
    }
    if !is_valid_url(field("pr_url")) {
        faults.push(FieldFault::PrUrlMalformed);
    }
    if !is_valid_twitter_id(field("twitter_id")) {
        faults.push(FieldFault::TwitterIdMalformed);
    }
    // x_feed_url is optional, blank values are skipped entirely
    let x_feed_url = field("x_feed_url");
    if !x_feed_url.trim().is_empty() && !is_valid_url(x_feed_url) {
        faults.push(FieldFault::XFeedUrlMalformed);
    }
    if !is_valid_line_user_id(field("line_user_id")) {
        faults.push(FieldFault::LineUserIdInvalid);
    }
    if !is_boolean_token(field("enabled")) {
        faults.push(FieldFault::EnabledInvalid);
    }

    faults
}
