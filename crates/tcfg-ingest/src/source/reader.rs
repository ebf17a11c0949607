//! CSV file reading into [`CsvTable`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};

use super::table::{CsvRow, CsvTable};

/// Reads a comma-delimited UTF-8 CSV file with a single header row.
///
/// Blank lines are skipped and rows may be shorter or longer than the header.
/// A missing file is reported as [`IngestError::FileNotFound`]; any decoding
/// or parsing failure as [`IngestError::CsvParse`].
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let table = read_csv_from_reader(file, path)?;
    tracing::debug!(
        path = %path.display(),
        columns = table.headers().len(),
        rows = table.len(),
        "loaded CSV table"
    );
    Ok(table)
}

/// Reads CSV content from any reader. `path` is only used in error messages.
pub fn read_csv_from_reader<R: Read>(source: R, path: &Path) -> Result<CsvTable> {
    let parse_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(parse_error)?;
        let fields = record.iter().map(str::to_string).collect();
        // Line 1 is the header.
        rows.push(CsvRow::new(index + 2, fields));
    }

    Ok(CsvTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table_single_header() {
        let file = create_temp_csv(b"A,B,C\n1,2,3\n4,5,6\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.headers(), ["A", "B", "C"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].line(), 2);
        assert_eq!(table.rows()[1].line(), 3);
        assert_eq!(table.value(&table.rows()[1], "B"), Some("5"));
    }

    #[test]
    fn test_read_csv_table_with_bom() {
        let file = create_temp_csv("\u{feff}A,B\n1,2\n".as_bytes());
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.headers(), ["A", "B"]);
    }

    #[test]
    fn test_read_csv_table_quoted_fields() {
        let file = create_temp_csv(b"name,config\nacme,\"{\"\"a\"\": 1}\"\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.value(&table.rows()[0], "config"), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_read_csv_table_header_only() {
        let file = create_temp_csv(b"A,B\n");
        let table = read_csv_table(file.path()).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.headers(), ["A", "B"]);
    }

    #[test]
    fn test_read_csv_table_ragged_rows() {
        let file = create_temp_csv(b"A,B,C\n1\n1,2,3,4\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.rows()[0].len(), 1);
        assert_eq!(table.rows()[1].len(), 4);
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/targets.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_invalid_utf8() {
        let file = create_temp_csv(b"A,B\n\xff\xfe,2\n");
        let result = read_csv_table(file.path());
        assert!(matches!(result, Err(IngestError::CsvParse { .. })));
    }
}
