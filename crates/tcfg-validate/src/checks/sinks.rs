//! Field rules for `sinks.csv` records.

use tcfg_ingest::{CsvRow, CsvTable};

use crate::formats::{is_boolean_token, is_config_json, is_sink_type};
use crate::issue::FieldFault;

pub fn check_row(table: &CsvTable, row: &CsvRow) -> Vec<FieldFault> {
    let field = |column: &str| table.value_or_empty(row, column);
    let mut faults = Vec::new();

    if field("tenant_id").trim().is_empty() {
        faults.push(FieldFault::TenantIdEmpty);
    }
    if !is_sink_type(field("type")) {
        faults.push(FieldFault::SinkTypeInvalid);
    }
    if !is_boolean_token(field("enabled")) {
        faults.push(FieldFault::EnabledInvalid);
    }
    if !is_config_json(field("config_json")) {
        faults.push(FieldFault::ConfigJsonInvalid);
    }

    faults
}
