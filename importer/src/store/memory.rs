//! In-process record store.
//!
//! [`MemoryDatabase`] holds committed rows and can be shared between runs;
//! [`MemoryStore`] is one transaction against it. Used for `--dry-run`
//! imports and for exercising the import driver without PostgreSQL.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::models::WordProfile;

/// A persisted row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProfile {
    pub profile: WordProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Committed rows keyed by word.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    rows: Arc<Mutex<BTreeMap<String, StoredProfile>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction.
    pub fn begin(&self) -> MemoryStore {
        MemoryStore {
            db: self.clone(),
            pending: BTreeMap::new(),
            faults: HashMap::new(),
            fail_commit: false,
            disconnected: false,
        }
    }

    pub fn get(&self, word: &str) -> Option<StoredProfile> {
        self.lock().get(word).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Committed words in sorted order.
    pub fn words(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, StoredProfile>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Only injected by tests; a dry run never fails.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fault {
    Reject,
    Disconnect,
}

/// One open transaction against a [`MemoryDatabase`].
///
/// Fault injection is available to this crate's tests only:
///
/// ```compile_fail
/// use lexiload::MemoryDatabase;
///
/// let store = MemoryDatabase::new().begin().fail_commit();
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    db: MemoryDatabase,
    pending: BTreeMap<String, StoredProfile>,
    faults: HashMap<String, Fault>,
    fail_commit: bool,
    disconnected: bool,
}

impl MemoryStore {
    /// Reject the upsert of `word` as a constraint violation would.
    #[cfg(test)]
    pub fn reject_word(mut self, word: impl Into<String>) -> Self {
        self.faults.insert(word.into(), Fault::Reject);
        self
    }

    /// Lose the connection when `word` is upserted; every later call fails.
    #[cfg(test)]
    pub fn disconnect_at(mut self, word: impl Into<String>) -> Self {
        self.faults.insert(word.into(), Fault::Disconnect);
        self
    }

    /// Make [`RecordStore::commit`] fail.
    #[cfg(test)]
    pub fn fail_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    /// Words written in this transaction, not yet committed.
    pub fn pending_words(&self) -> Vec<String> {
        self.pending.keys().cloned().collect()
    }

    fn connection_lost() -> StoreError {
        StoreError::Connection("connection to in-memory store was closed".to_string())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert(&mut self, profile: &WordProfile) -> StoreResult<()> {
        if self.disconnected {
            return Err(Self::connection_lost());
        }

        match self.faults.get(&profile.word) {
            Some(Fault::Reject) => {
                return Err(StoreError::Rejected {
                    word: profile.word.clone(),
                    message: "rejected by store".to_string(),
                });
            }
            Some(Fault::Disconnect) => {
                self.disconnected = true;
                return Err(Self::connection_lost());
            }
            None => {}
        }

        let now = Utc::now();
        let created_at = self
            .pending
            .get(&profile.word)
            .map(|row| row.created_at)
            .or_else(|| self.db.get(&profile.word).map(|row| row.created_at))
            .unwrap_or(now);

        self.pending.insert(
            profile.word.clone(),
            StoredProfile {
                profile: profile.clone(),
                created_at,
                updated_at: now,
            },
        );
        Ok(())
    }

    async fn commit(self) -> StoreResult<()> {
        if self.disconnected {
            return Err(Self::connection_lost());
        }
        if self.fail_commit {
            return Err(StoreError::Transaction("commit refused".to_string()));
        }

        self.db.lock().extend(self.pending);
        Ok(())
    }

    async fn rollback(self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(word: &str, primary: &str) -> WordProfile {
        let mut profile = WordProfile {
            word: word.to_string(),
            ..Default::default()
        };
        profile.definitions.primary = primary.to_string();
        profile
    }

    #[tokio::test]
    async fn test_upsert_visible_after_commit() {
        let db = MemoryDatabase::new();
        let mut store = db.begin();

        store.upsert(&profile("terse", "brief")).await.unwrap();
        assert!(db.is_empty());
        assert_eq!(store.pending_words(), vec!["terse"]);

        store.commit().await.unwrap();
        assert_eq!(db.words(), vec!["terse"]);
    }

    #[tokio::test]
    async fn test_rollback_discards() {
        let db = MemoryDatabase::new();
        let mut store = db.begin();

        store.upsert(&profile("terse", "brief")).await.unwrap();
        store.rollback().await.unwrap();
        assert!(db.is_empty());
    }

    #[tokio::test]
    async fn test_conflict_overwrites_and_keeps_created_at() {
        let db = MemoryDatabase::new();

        let mut store = db.begin();
        store.upsert(&profile("terse", "brief")).await.unwrap();
        store.commit().await.unwrap();
        let first = db.get("terse").unwrap();

        let mut store = db.begin();
        store.upsert(&profile("terse", "curt")).await.unwrap();
        store.commit().await.unwrap();
        let second = db.get("terse").unwrap();

        assert_eq!(db.len(), 1);
        assert_eq!(second.profile.definitions.primary, "curt");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_rejected_word_leaves_transaction_usable() {
        let db = MemoryDatabase::new();
        let mut store = db.begin().reject_word("bad");

        let err = store.upsert(&profile("bad", "")).await.unwrap_err();
        assert!(!err.is_fatal());

        store.upsert(&profile("good", "")).await.unwrap();
        store.commit().await.unwrap();
        assert_eq!(db.words(), vec!["good"]);
    }

    #[tokio::test]
    async fn test_disconnect_is_sticky() {
        let db = MemoryDatabase::new();
        let mut store = db.begin().disconnect_at("cut");

        assert!(store.upsert(&profile("cut", "")).await.unwrap_err().is_fatal());
        assert!(store.upsert(&profile("after", "")).await.unwrap_err().is_fatal());
        assert!(store.commit().await.is_err());
        assert!(db.is_empty());
    }

    #[tokio::test]
    async fn test_fail_commit() {
        let db = MemoryDatabase::new();
        let mut store = db.begin().fail_commit();

        store.upsert(&profile("terse", "")).await.unwrap();
        let err = store.commit().await.unwrap_err();
        assert!(err.is_fatal());
        assert!(db.is_empty());
    }
}
