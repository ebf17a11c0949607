//! CSV to JSON record normalization.

use std::path::Path;

use serde_json::{Map, Value};
use tcfg_ingest::{CsvTable, read_csv_table};

use crate::error::Result;

/// One published record: header columns in header order.
pub type NormalizedRecord = Map<String, Value>;

/// Column re-typed to a JSON boolean on publish.
pub const ENABLED_COLUMN: &str = "enabled";

/// Load a configuration CSV and normalize every record.
///
/// A missing or unparseable file is an error; an empty file yields no
/// records.
pub fn load_and_normalize(path: &Path) -> Result<Vec<NormalizedRecord>> {
    let table = read_csv_table(path)?;
    Ok(normalize_table(&table))
}

/// Convert each row to a JSON object keyed by the header.
///
/// Fields missing from a short row become `null`; fields beyond the header
/// width are dropped. Row order is preserved and nothing is deduplicated.
pub fn normalize_table(table: &CsvTable) -> Vec<NormalizedRecord> {
    let headers = table.headers();
    let mut records = Vec::with_capacity(table.len());

    for row in table.rows() {
        if row.len() > headers.len() {
            tracing::warn!(
                line = row.line(),
                fields = row.len(),
                columns = headers.len(),
                "dropping fields beyond the header"
            );
        }

        let mut record = Map::new();
        for (index, header) in headers.iter().enumerate() {
            let value = row
                .get(index)
                .map_or(Value::Null, |text| Value::String(text.to_string()));
            record.insert(header.clone(), value);
        }
        normalize_enabled(&mut record);
        records.push(record);
    }

    records
}

/// Replace a textual `enabled` value with a boolean.
///
/// Only a value equal to `true` after lowercasing maps to `true`. Other
/// tokens the validator accepts as truthy (`1`, `yes`) map to `false`.
pub fn normalize_enabled(record: &mut NormalizedRecord) {
    if let Some(value) = record.get_mut(ENABLED_COLUMN)
        && let Some(text) = value.as_str()
    {
        let enabled = text.to_lowercase() == "true";
        *value = Value::Bool(enabled);
    }
}
