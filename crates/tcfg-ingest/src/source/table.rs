//! In-memory representation of a parsed configuration CSV.

/// One data record together with its physical line number.
///
/// Line numbers follow the convention that line 1 is the header, so the
/// first record is line 2. Fields keep their raw width: a short row has fewer
/// fields than the header, a long row has more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    line: usize,
    fields: Vec<String>,
}

impl CsvRow {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Line number of the record, counting the header as line 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw field at `index`, or `None` when the row is too short.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of fields present in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Header plus ordered data records of a CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<CsvRow>) -> Self {
        Self { headers, rows }
    }

    /// Column names in header order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data records in file order.
    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the file has no data records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column. When a header name repeats, the last one wins.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().rposition(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value of `column` in `row`.
    ///
    /// Returns `None` when the column is not in the header or the row is too
    /// short to contain it.
    pub fn value<'a>(&self, row: &'a CsvRow, column: &str) -> Option<&'a str> {
        self.column_index(column).and_then(|index| row.get(index))
    }

    /// Value of `column` in `row`, treating an absent value as empty.
    pub fn value_or_empty<'a>(&self, row: &'a CsvRow, column: &str) -> &'a str {
        self.value(row, column).unwrap_or_default()
    }
}
