//! CSV source reading.

mod reader;
mod table;

pub use reader::{read_csv_from_reader, read_csv_table};
pub use table::{CsvRow, CsvTable};
