//! Persistence seams consumed by the application layer.
//!
//! The traits mirror the operations the services actually need: single-record
//! writes with per-record atomicity, filtered lookups by external id, and a
//! group-count used to rebuild counter snapshots. Multi-record consistency is
//! explicitly not promised; the counter aggregator compensates by always
//! recomputing from scratch.

pub mod image_store;
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::counter::CounterSnapshot;
use crate::domain::kind::Kind;
use crate::domain::records::Record;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("storage failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Inserts a new record. Fails with [`StoreError::DuplicateKey`] when the
    /// external id is already taken.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Returns all live records in insertion order.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    async fn find_one(&self, external_id: &str) -> Result<Option<T>, StoreError>;

    /// Replaces the record addressed by `external_id`, returning the stored
    /// value, or `None` when no such record exists.
    async fn replace(&self, external_id: &str, record: T) -> Result<Option<T>, StoreError>;

    async fn find_one_and_delete(&self, external_id: &str) -> Result<Option<T>, StoreError>;

    /// Removes every record whose external id appears in `external_ids` and
    /// returns the removed records.
    async fn delete_many(&self, external_ids: &[String]) -> Result<Vec<T>, StoreError>;

    /// Groups live records by status label and counts each group. Records
    /// without a status are not counted.
    async fn count_by_status(&self) -> Result<HashMap<String, u64>, StoreError>;
}

#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, kind: Kind) -> Result<Option<CounterSnapshot>, StoreError>;

    /// Creates or fully overwrites the singleton snapshot for `kind`.
    async fn upsert(
        &self,
        kind: Kind,
        snapshot: CounterSnapshot,
    ) -> Result<CounterSnapshot, StoreError>;
}
