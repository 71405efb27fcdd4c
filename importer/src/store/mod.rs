//! Record stores: where word profiles are upserted.
//!
//! A store represents one open transaction. Profiles written through
//! [`RecordStore::upsert`] become visible only after [`RecordStore::commit`];
//! [`RecordStore::rollback`] discards all of them. Both consume the store and
//! release its connection.

mod memory;
mod postgres;

pub use memory::{MemoryDatabase, MemoryStore, StoredProfile};
pub use postgres::PgRecordStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::WordProfile;

/// Transactional, word-keyed profile storage.
#[async_trait]
pub trait RecordStore: Send {
    /// Insert the profile, or replace all five category documents of the
    /// existing row with the same `word` and refresh its `updated_at`.
    ///
    /// A non-fatal error (see [`crate::error::StoreError::is_fatal`]) leaves
    /// the transaction usable for the next row.
    async fn upsert(&mut self, profile: &WordProfile) -> StoreResult<()>;

    /// Make every successful upsert durable.
    async fn commit(self) -> StoreResult<()>;

    /// Discard every upsert made through this store.
    async fn rollback(self) -> StoreResult<()>;
}
