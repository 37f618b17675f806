//! In-memory store backends. Rows are kept in insertion order behind a
//! tokio `RwLock`; lookups scan linearly, which is fine at the collection
//! sizes this backend serves.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::counter::CounterSnapshot;
use crate::domain::kind::Kind;
use crate::domain::records::Record;
use crate::infrastructure::{CounterStore, RecordStore, StoreError};

pub struct MemoryRecordStore<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> MemoryRecordStore<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryRecordStore<T> {
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|row| row.external_id() == record.external_id())
        {
            return Err(StoreError::DuplicateKey(format!(
                "external id '{}' already exists",
                record.external_id()
            )));
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_one(&self, external_id: &str) -> Result<Option<T>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.external_id() == external_id)
            .cloned())
    }

    async fn replace(&self, external_id: &str, record: T) -> Result<Option<T>, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| row.external_id() == external_id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn find_one_and_delete(&self, external_id: &str) -> Result<Option<T>, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.iter().position(|row| row.external_id() == external_id) {
            Some(index) => Ok(Some(rows.remove(index))),
            None => Ok(None),
        }
    }

    async fn delete_many(&self, external_ids: &[String]) -> Result<Vec<T>, StoreError> {
        let mut rows = self.rows.write().await;
        let mut removed = Vec::new();
        rows.retain(|row| {
            if external_ids.iter().any(|id| id == row.external_id()) {
                removed.push(row.clone());
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    async fn count_by_status(&self) -> Result<HashMap<String, u64>, StoreError> {
        let rows = self.rows.read().await;
        let mut grouped: HashMap<String, u64> = HashMap::new();
        for row in rows.iter() {
            if let Some(status) = row.status_label() {
                *grouped.entry(status.to_string()).or_insert(0) += 1;
            }
        }
        Ok(grouped)
    }
}

pub struct MemoryCounterStore {
    snapshots: RwLock<HashMap<Kind, CounterSnapshot>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, kind: Kind) -> Result<Option<CounterSnapshot>, StoreError> {
        Ok(self.snapshots.read().await.get(&kind).cloned())
    }

    async fn upsert(
        &self,
        kind: Kind,
        snapshot: CounterSnapshot,
    ) -> Result<CounterSnapshot, StoreError> {
        self.snapshots.write().await.insert(kind, snapshot.clone());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::kind::EventStatus;
    use crate::domain::records::Event;

    fn event(id: &str, status: EventStatus) -> Event {
        let now = Utc::now();
        Event {
            event_id: id.to_string(),
            title: "Fest".to_string(),
            description: None,
            target_audience: None,
            event_date: now.date_naive(),
            end_date: now.date_naive(),
            category: "cultural".to_string(),
            location: "Main Hall".to_string(),
            total_slots: 100,
            booked_slots: 0,
            event_status: status,
            image: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_external_id() {
        let store = MemoryRecordStore::new();
        store.insert(event("111111", EventStatus::Upcoming)).await.unwrap();

        let err = store
            .insert(event("111111", EventStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn count_by_status_groups_live_records() {
        let store = MemoryRecordStore::new();
        store.insert(event("1", EventStatus::Upcoming)).await.unwrap();
        store.insert(event("2", EventStatus::Upcoming)).await.unwrap();
        store.insert(event("3", EventStatus::Canceled)).await.unwrap();
        store.find_one_and_delete("2").await.unwrap();

        let grouped = store.count_by_status().await.unwrap();
        assert_eq!(grouped.get("upcoming"), Some(&1));
        assert_eq!(grouped.get("canceled"), Some(&1));
        assert_eq!(grouped.get("completed"), None);
    }

    #[tokio::test]
    async fn delete_many_returns_removed_rows_only() {
        let store = MemoryRecordStore::new();
        store.insert(event("1", EventStatus::Upcoming)).await.unwrap();
        store.insert(event("2", EventStatus::Upcoming)).await.unwrap();

        let removed = store
            .delete_many(&["2".to_string(), "9".to_string()])
            .await
            .unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].event_id, "2");
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn counter_store_upserts_singleton() {
        let store = MemoryCounterStore::new();
        assert!(store.get(Kind::Event).await.unwrap().is_none());

        let first = CounterSnapshot::from_grouped(
            EventStatus::ALL_LABELS,
            &HashMap::from([("upcoming".to_string(), 1u64)]),
            Utc::now(),
        );
        store.upsert(Kind::Event, first.clone()).await.unwrap();
        assert_eq!(store.get(Kind::Event).await.unwrap(), Some(first));

        let second = CounterSnapshot::from_grouped(
            EventStatus::ALL_LABELS,
            &HashMap::new(),
            Utc::now(),
        );
        store.upsert(Kind::Event, second.clone()).await.unwrap();
        assert_eq!(store.get(Kind::Event).await.unwrap(), Some(second));
    }
}
