//! Simulation log loading with text-encoding fallback.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::RecordSet;

/// Failure to turn a log file into a [`RecordSet`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error loading file: {0}")]
    Io(#[from] io::Error),

    #[error("Error parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("No columns to parse from file")]
    NoColumns,
}

/// Text encoding a log was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// ISO-8859-1. Every byte maps to a character, so this never fails.
    Latin1,
}

/// Reads and parses the CSV log at `path`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] when the file does not exist, and the
/// other variants for read failures, malformed CSV, or a file without a
/// header row.
pub fn load_log(path: &Path) -> Result<RecordSet, LoadError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;
    let (text, encoding) = decode(&bytes);
    if encoding != Encoding::Utf8 {
        log::info!("{} is not UTF-8, decoded as {encoding:?}", path.display());
    }
    let records = parse_csv(&text)?;
    log::info!(
        "loaded {} rows x {} columns from {}",
        records.len(),
        records.headers().len(),
        path.display()
    );
    Ok(records)
}

/// Decodes raw bytes, trying UTF-8 first and falling back to Latin-1.
pub fn decode(bytes: &[u8]) -> (String, Encoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (
            text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
            Encoding::Utf8,
        ),
        Err(_) => (bytes.iter().map(|&b| char::from(b)).collect(), Encoding::Latin1),
    }
}

/// Parses CSV text with a header row. Headers and cells are trimmed and
/// ragged rows are accepted.
///
/// # Errors
///
/// Returns [`LoadError::Csv`] for malformed input and
/// [`LoadError::NoColumns`] when there is no header.
pub fn parse_csv(text: &str) -> Result<RecordSet, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(String::is_empty) {
        return Err(LoadError::NoColumns);
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RecordSet::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const LOG: &str = "Time, BP Count ,Batteries Taken,Customers Served\n\
                       7:00:00,14,B1,1\n\
                       7:06:00,13,-,1\n";

    #[test]
    fn parses_header_and_rows() {
        let rs = parse_csv(LOG).expect("valid csv");
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.column_index("BP Count"), Some(1));
        assert_eq!(rs.cell(1, 2), Some("-"));
    }

    #[test]
    fn empty_text_has_no_columns() {
        assert!(matches!(parse_csv(""), Err(LoadError::NoColumns)));
    }

    #[test]
    fn ragged_rows_are_kept() {
        let rs = parse_csv("a,b,c\n1,2\n3,4,5\n").expect("flexible csv");
        assert_eq!(rs.cell(0, 2), None);
        assert_eq!(rs.cell(1, 2), Some("5"));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (text, enc) = decode("\u{feff}Time\n".as_bytes());
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "Time\n");
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        let (text, enc) = decode(&[b'C', 0xE9, b'\n']);
        assert_eq!(enc, Encoding::Latin1);
        assert_eq!(text, "C\u{e9}\n");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_log(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn loads_latin1_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.csv");
        let mut f = fs::File::create(&path).expect("create");
        f.write_all(b"Time,Station\xE9,Customers\n7:00:00,A,1\n")
            .expect("write");
        drop(f);

        let rs = load_log(&path).expect("latin-1 log loads");
        assert_eq!(rs.headers()[1], "Station\u{e9}");
        assert_eq!(rs.len(), 1);
    }
}
