//! In-memory table of one simulation log.

/// Ordered rows of a simulation log, with whitespace-trimmed headers.
///
/// Cells are kept as text; numeric views are produced on demand so a
/// column with stray non-numeric cells still yields its parseable values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordSet {
    /// Builds a record set, trimming header names.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the first column whose name contains `needle`, ignoring case.
    pub fn find_column_containing(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .position(|h| h.to_lowercase().contains(&needle))
    }

    /// Index of the last column, if there are any columns.
    pub fn last_column(&self) -> Option<usize> {
        self.headers.len().checked_sub(1)
    }

    /// Cell text at `(row, col)`. Short rows yield `None` for missing cells.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cell at `(row, col)` parsed as a finite number.
    pub fn numeric_cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).and_then(parse_number)
    }

    /// Iterates one column top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(col).map(String::as_str))
    }

    /// Parseable numeric values of one column, in row order. Blank and
    /// non-numeric cells are skipped.
    pub fn numeric_column(&self, col: usize) -> Vec<f64> {
        self.column(col).flatten().filter_map(parse_number).collect()
    }

    /// The first `n` rows as a new record set.
    pub fn head(&self, n: usize) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Parses a cell as a finite `f64`; blank, `NaN` and text cells yield `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
