//! Import driver: rows in, upserts out.
//!
//! Rows are processed strictly in order. A row either succeeds, or fails on
//! its own (empty word, rejected by the store) and is counted; the batch
//! goes on. A fatal store error rolls back the whole run and is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use lexiload::{parse_csv_file, DatabaseConfig, Importer};
//!
//! let parsed = parse_csv_file("words.csv", None)?;
//! let importer = Importer::connect(&DatabaseConfig::from_env()?).await?;
//! let summary = importer.run(parsed.records).await?;
//! println!("{summary}");
//! ```

use std::fmt;

use tracing::{error, info, warn};

use crate::config::DatabaseConfig;
use crate::error::{ImportResult, RowError, StoreResult};
use crate::models::FlatRecord;
use crate::sample::columns;
use crate::store::{PgRecordStore, RecordStore};
use crate::transform::profile_from_record;

/// One row that was not imported.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based data row (the header is not counted).
    pub row: usize,
    /// Trimmed word; empty for rows skipped for lack of one.
    pub word: String,
    pub reason: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import completed: {} successful, {} errors",
            self.succeeded, self.failed
        )
    }
}

/// Header problems worth telling the user about before importing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderReport {
    /// Columns the transformer never reads.
    pub unknown: Vec<String>,
    /// Without a `word` column every row is skipped.
    pub missing_word: bool,
}

/// Compare input headers against the known column set.
pub fn check_headers(headers: &[String]) -> HeaderReport {
    HeaderReport {
        unknown: headers
            .iter()
            .filter(|h| !columns().any(|known| known == h.as_str()))
            .cloned()
            .collect(),
        missing_word: !headers.iter().any(|h| h == "word"),
    }
}

/// Log a [`HeaderReport`].
pub fn report_headers(headers: &[String]) -> HeaderReport {
    let report = check_headers(headers);
    if report.missing_word {
        error!("Input has no 'word' column; every row will be skipped");
    }
    if !report.unknown.is_empty() {
        warn!("Ignoring unknown columns: {}", report.unknown.join(", "));
    }
    report
}

/// Drives one import run against one store transaction.
pub struct Importer<S> {
    store: S,
}

impl Importer<PgRecordStore> {
    /// Connect to PostgreSQL and open the run's transaction.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        Ok(Self::new(PgRecordStore::connect(config).await?))
    }
}

impl<S: RecordStore> Importer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Import every record, then commit.
    ///
    /// Row-level failures are counted in the summary. A fatal store error
    /// (connection loss, failed commit) rolls back everything written in
    /// this run and is returned instead of a summary.
    pub async fn run<I>(self, records: I) -> ImportResult<ImportSummary>
    where
        I: IntoIterator<Item = FlatRecord>,
    {
        let mut store = self.store;
        let mut summary = ImportSummary::default();

        for (idx, record) in records.into_iter().enumerate() {
            let row = idx + 1;
            let profile = profile_from_record(&record);

            let outcome = if profile.has_word() {
                store.upsert(&profile).await.map_err(RowError::from)
            } else {
                Err(RowError::MissingWord)
            };

            match outcome {
                Ok(()) => {
                    summary.succeeded += 1;
                    info!("Row {}: Successfully imported '{}'", row, profile.word);
                }
                Err(RowError::Store(err)) if err.is_fatal() => {
                    error!("Row {}: {}", row, err);
                    error!("Import failed, rolling back: {}", err);
                    if let Err(rollback_err) = store.rollback().await {
                        warn!("Rollback failed: {}", rollback_err);
                    }
                    return Err(err.into());
                }
                Err(err) => {
                    match err {
                        RowError::MissingWord => warn!("Row {}: {}", row, err),
                        RowError::Store(_) => error!("Row {}: Error importing word - {}", row, err),
                    }
                    summary.failed += 1;
                    summary.failures.push(RowFailure {
                        row,
                        word: profile.word,
                        reason: err.to_string(),
                    });
                }
            }
        }

        if let Err(err) = store.commit().await {
            error!("Import failed at commit: {}", err);
            return Err(err.into());
        }

        info!("{}", summary);
        Ok(summary)
    }
}
