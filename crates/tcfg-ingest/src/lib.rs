//! Configuration CSV ingestion.
//!
//! Loads `config/targets.csv` and `config/sinks.csv` style files into a
//! [`CsvTable`]: the header row plus every data record with its physical line
//! number. Values are kept as raw strings; interpretation is left to the
//! validation and publishing crates.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tcfg_ingest::read_csv_table;
//!
//! let table = read_csv_table(Path::new("config/targets.csv"))?;
//! for row in table.rows() {
//!     println!("line {}: {}", row.line(), table.value_or_empty(row, "tenant_id"));
//! }
//! ```

mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use source::{CsvRow, CsvTable, read_csv_from_reader, read_csv_table};
