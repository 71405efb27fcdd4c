//! Error types for the lexiload import pipeline.
//!
//! - [`CsvError`] - CSV reading errors
//! - [`StoreError`] - Record store errors (row-level or fatal)
//! - [`ConfigError`] - Configuration errors
//! - [`RowError`] - Why a single row was not imported
//! - [`ImportError`] - Top-level errors that abort a run
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content.
    #[error("Line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file (no header row).
    #[error("CSV file is empty")]
    EmptyFile,

    /// Column separator must be a single ASCII character.
    #[error("Unsupported delimiter: '{0}'")]
    InvalidDelimiter(char),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CsvError::Io(io),
            _ => CsvError::Parse { line, message },
        }
    }
}

// =============================================================================
// Record Store Errors
// =============================================================================

/// Errors raised by a [`crate::store::RecordStore`].
///
/// `Rejected` only concerns the row being written.
/// `Connection` and `Transaction` mean the store can no longer be trusted
/// and the whole run must be rolled back.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused this particular row.
    #[error("Row rejected for '{word}': {message}")]
    Rejected { word: String, message: String },

    /// Connection lost or could not be established.
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// Transaction-level failure (begin, commit, rollback).
    #[error("Transaction failed: {0}")]
    Transaction(String),
}

impl StoreError {
    /// Whether this error must abort the whole import.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Transaction(_))
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the import configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No database URL given on the command line or in the environment.
    #[error("Missing DATABASE_URL (set it in the environment, .env, or pass --database-url)")]
    MissingDatabaseUrl,

    /// Table name is not a plain (optionally schema-qualified) identifier.
    #[error("Invalid table name: '{0}'")]
    InvalidTableName(String),

    /// An environment value could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Row Errors
// =============================================================================

/// Reason a single row was counted as an error.
#[derive(Debug, Error)]
pub enum RowError {
    /// `word` is empty after trimming.
    #[error("Missing word, skipping")]
    MissingWord,

    /// The store rejected the upsert.
    #[error("{0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Fatal store error; the transaction was rolled back.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for a full import run.
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let import_err: ImportError = csv_err.into();
        assert!(import_err.to_string().contains("empty"));

        let store_err = StoreError::Connection("reset by peer".into());
        let import_err: ImportError = store_err.into();
        assert!(import_err.to_string().contains("reset by peer"));
    }

    #[test]
    fn test_store_error_fatality() {
        assert!(StoreError::Connection("gone".into()).is_fatal());
        assert!(StoreError::Transaction("commit".into()).is_fatal());

        let rejected = StoreError::Rejected {
            word: "superfluous".into(),
            message: "check constraint".into(),
        };
        assert!(!rejected.is_fatal());
    }

    #[test]
    fn test_rejected_message_names_word() {
        let err = RowError::from(StoreError::Rejected {
            word: "gregarious".into(),
            message: "value too long".into(),
        });
        let msg = err.to_string();
        assert!(msg.contains("gregarious"));
        assert!(msg.contains("value too long"));
    }

    #[test]
    fn test_csv_error_from_utf8_is_parse_error() {
        let data: &[u8] = b"word\nok\n\xff\xfe\n";
        let mut reader = csv::ReaderBuilder::new().from_reader(data);
        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("invalid utf-8 should fail");
        match CsvError::from(err) {
            CsvError::Parse { line, message } => {
                assert!(line > 1);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
