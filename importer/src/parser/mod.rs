//! CSV reader producing [`FlatRecord`]s.
//!
//! Input is UTF-8 (a leading BOM is dropped). The column separator is
//! either given or detected from the header line. `|` is never a column
//! separator here because list columns use it inside cells.

use std::path::Path;

use tracing::warn;

use crate::error::{CsvError, CsvResult};
use crate::models::FlatRecord;

/// Separators considered by [`detect_delimiter`].
const CANDIDATE_DELIMITERS: [char; 3] = [',', ';', '\t'];

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows, in file order
    pub records: Vec<FlatRecord>,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers (trimmed)
    pub headers: Vec<String>,
}

/// Decode raw bytes as UTF-8, dropping a BOM.
///
/// Invalid sequences are replaced rather than rejected.
pub fn decode_content(bytes: &[u8]) -> String {
    let (content, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        warn!("Input is not valid UTF-8; invalid bytes were replaced");
    }
    content.into_owned()
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when none of the candidates appear.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &CANDIDATE_DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// # Example
/// ```
/// use lexiload::parse_csv;
///
/// let result = parse_csv("word,root_text\nsuperfluous,flu\n", ',').unwrap();
/// assert_eq!(result.records.len(), 1);
/// assert_eq!(result.records[0]["root_text"], "flu");
/// ```
pub fn parse_csv(content: &str, delimiter: char) -> CsvResult<ParseResult> {
    if !delimiter.is_ascii() {
        return Err(CsvError::InvalidDelimiter(delimiter));
    }
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: FlatRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        records.push(row);
    }

    Ok(ParseResult {
        records,
        delimiter,
        headers,
    })
}

/// Parse CSV bytes; the delimiter is detected when not given.
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let content = decode_content(bytes);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    parse_csv(&content, delimiter)
}

/// Read and parse a CSV file; the delimiter is detected when not given.
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}
