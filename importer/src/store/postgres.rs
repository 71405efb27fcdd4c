//! PostgreSQL record store.
//!
//! One connection, one transaction per run. Each upsert runs inside a
//! savepoint so a rejected row is rolled back on its own and the rest of
//! the batch can continue in the same transaction.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, warn};

use super::RecordStore;
use crate::config::{mask_database_url, DatabaseConfig};
use crate::error::{StoreError, StoreResult};
use crate::models::WordProfile;

const SAVEPOINT: &str = "lexiload_row";

/// Upserts into a `word_profiles`-shaped table.
///
/// The table needs a unique constraint on `word`, five `jsonb` columns
/// (`morpheme_breakdown`, `etymology`, `definitions`, `word_forms`,
/// `analysis`) and an `updated_at` timestamp.
///
/// Dropping the store without calling [`RecordStore::commit`] rolls the
/// transaction back.
pub struct PgRecordStore {
    pool: PgPool,
    tx: Transaction<'static, Postgres>,
    upsert_sql: String,
}

impl PgRecordStore {
    /// Connect and open the run's transaction.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        info!(
            "Connecting to database: {}",
            mask_database_url(&config.database_url)
        );

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(config.connect_timeout)
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                StoreError::Connection(e.to_string())
            })?;

        let tx = pool.begin().await.map_err(control_error)?;
        info!("Transaction opened on {}", config.table);

        Ok(Self {
            pool,
            tx,
            upsert_sql: upsert_sql(&config.table),
        })
    }

    async fn savepoint(&mut self, statement: &str) -> StoreResult<()> {
        sqlx::query(statement)
            .execute(&mut *self.tx)
            .await
            .map(|_| ())
            .map_err(control_error)
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn upsert(&mut self, profile: &WordProfile) -> StoreResult<()> {
        self.savepoint(&format!("SAVEPOINT {SAVEPOINT}")).await?;

        let result = sqlx::query(&self.upsert_sql)
            .bind(&profile.word)
            .bind(Json(&profile.morpheme_breakdown))
            .bind(Json(&profile.etymology))
            .bind(Json(&profile.definitions))
            .bind(Json(&profile.word_forms))
            .bind(Json(&profile.analysis))
            .execute(&mut *self.tx)
            .await;

        match result {
            Ok(done) => {
                debug!("Upserted '{}' ({} row)", profile.word, done.rows_affected());
                self.savepoint(&format!("RELEASE SAVEPOINT {SAVEPOINT}")).await
            }
            Err(e) => {
                let err = classify(&profile.word, e);
                if !err.is_fatal() {
                    self.savepoint(&format!("ROLLBACK TO SAVEPOINT {SAVEPOINT}"))
                        .await?;
                }
                Err(err)
            }
        }
    }

    async fn commit(self) -> StoreResult<()> {
        let result = self.tx.commit().await;
        self.pool.close().await;
        result.map_err(control_error)
    }

    async fn rollback(self) -> StoreResult<()> {
        let result = self.tx.rollback().await;
        self.pool.close().await;
        result.map_err(control_error)
    }
}

/// `table` must already be validated (see [`crate::config::validate_table_name`]).
fn upsert_sql(table: &str) -> String {
    format!(
        r#"
        INSERT INTO {table}
        (word, morpheme_breakdown, etymology, definitions, word_forms, analysis)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (word) DO UPDATE SET
            morpheme_breakdown = EXCLUDED.morpheme_breakdown,
            etymology = EXCLUDED.etymology,
            definitions = EXCLUDED.definitions,
            word_forms = EXCLUDED.word_forms,
            analysis = EXCLUDED.analysis,
            updated_at = NOW()
        "#
    )
}

/// Whether a driver error means the connection itself is gone.
fn is_connection_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        // 08xxx connection exception, 57P0x operator intervention (shutdown)
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| code.starts_with("08") || code.starts_with("57P")),
        _ => false,
    }
}

/// Whether a database error aborted the transaction rather than one row.
fn is_transaction_error(err: &sqlx::Error) -> bool {
    // 25xxx invalid transaction state, 40xxx transaction rollback
    matches!(err, sqlx::Error::Database(db)
        if db.code().is_some_and(|code| code.starts_with("25") || code.starts_with("40")))
}

/// Map an error from a row upsert.
fn classify(word: &str, err: sqlx::Error) -> StoreError {
    if is_connection_error(&err) {
        StoreError::Connection(err.to_string())
    } else if is_transaction_error(&err) {
        StoreError::Transaction(err.to_string())
    } else {
        StoreError::Rejected {
            word: word.to_string(),
            message: err.to_string(),
        }
    }
}

/// Map an error from a transaction control statement; always fatal.
fn control_error(err: sqlx::Error) -> StoreError {
    if is_connection_error(&err) {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Transaction(err.to_string())
    }
}
