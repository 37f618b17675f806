//! Generic mutation service: one implementation of the create/update/delete
//! orchestration shared by every entity kind, parameterized by the kind and
//! its record type instead of being copied per controller.
//!
//! Mutations are best-effort multi-step sequences. The store write is the
//! commit point; an image saved earlier in the same operation is deleted
//! again (compensating action, attempted once) when the write fails. Image
//! removal after a successful delete is cleanup outside the transaction
//! boundary and never rolls the delete back.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::application::counter::CounterService;
use crate::application::ids::IdGenerator;
use crate::domain::counter::CounterSnapshot;
use crate::domain::errors::DomainError;
use crate::domain::kind::Kind;
use crate::domain::records::Record;
use crate::infrastructure::image_store::{ImageStore, StagedUpload};
use crate::infrastructure::RecordStore;

/// Values the service supplies when a new record is built: the generated
/// external id, the stored image path (when an upload accompanied the
/// request), and the creation instant.
pub struct RecordDraft {
    pub external_id: String,
    pub image_path: Option<String>,
    pub now: DateTime<Utc>,
}

pub struct EntityService<T: Record> {
    kind: Kind,
    store: Arc<dyn RecordStore<T>>,
    counters: CounterService,
    images: Arc<ImageStore>,
    ids: IdGenerator,
}

impl<T: Record> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            store: Arc::clone(&self.store),
            counters: self.counters.clone(),
            images: Arc::clone(&self.images),
            ids: self.ids,
        }
    }
}

impl<T: Record> EntityService<T> {
    pub fn new(
        kind: Kind,
        store: Arc<dyn RecordStore<T>>,
        counters: CounterService,
        images: Arc<ImageStore>,
    ) -> Self {
        Self {
            kind,
            store,
            counters,
            images,
            ids: IdGenerator,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Saves the optional upload, builds the record through `build`, persists
    /// it, and refreshes the counter snapshot for countable kinds. A failed
    /// persist deletes the image saved moments before.
    pub async fn create<F>(&self, upload: Option<StagedUpload>, build: F) -> Result<T, DomainError>
    where
        F: FnOnce(RecordDraft) -> T,
    {
        let image_path = match &upload {
            Some(upload) => Some(self.images.save(self.kind, upload).await?),
            None => None,
        };

        let draft = RecordDraft {
            external_id: self.ids.generate(self.kind),
            image_path: image_path.clone(),
            now: Utc::now(),
        };
        let record = build(draft);

        match self.store.insert(record).await {
            Ok(saved) => {
                self.counters.refresh(self.kind, self.store.as_ref()).await?;
                info!(kind = %self.kind, id = saved.external_id(), "record created");
                Ok(saved)
            }
            Err(err) => {
                if let Some(path) = &image_path {
                    self.images.delete(path).await;
                }
                Err(err.into())
            }
        }
    }

    /// All records, ordered by the kind's recency field descending where one
    /// exists, insertion order otherwise.
    pub async fn list(&self) -> Result<Vec<T>, DomainError> {
        let mut rows = self.store.find_all().await?;
        rows.sort_by_key(|row| Reverse(row.recency()));
        Ok(rows)
    }

    pub async fn get(&self, external_id: &str) -> Result<T, DomainError> {
        self.store
            .find_one(external_id)
            .await?
            .ok_or_else(|| self.not_found())
    }

    /// Looks the record up, swaps the image when a new one was uploaded (the
    /// old file is deleted first), applies the field changes, and persists.
    /// A failed persist deletes the newly saved image; the old file is not
    /// recoverable at that point — an accepted loss on this rare path.
    pub async fn update<F>(
        &self,
        external_id: &str,
        upload: Option<StagedUpload>,
        apply: F,
    ) -> Result<T, DomainError>
    where
        F: FnOnce(&mut T),
    {
        let mut record = self.get(external_id).await?;

        let mut new_image: Option<String> = None;
        if let Some(upload) = &upload {
            if let Some(old) = record.image_path().map(str::to_string) {
                self.images.delete(&old).await;
            }
            let saved = self.images.save(self.kind, upload).await?;
            record.set_image_path(Some(saved.clone()));
            new_image = Some(saved);
        }

        apply(&mut record);
        record.touch(Utc::now());

        match self.store.replace(external_id, record).await {
            Ok(Some(updated)) => {
                self.counters.refresh(self.kind, self.store.as_ref()).await?;
                info!(kind = %self.kind, id = external_id, "record updated");
                Ok(updated)
            }
            Ok(None) => {
                // Deleted underneath us between lookup and write.
                if let Some(path) = &new_image {
                    self.images.delete(path).await;
                }
                Err(self.not_found())
            }
            Err(err) => {
                if let Some(path) = &new_image {
                    self.images.delete(path).await;
                }
                Err(err.into())
            }
        }
    }

    /// Deletes the record, then best-effort releases its image, then
    /// refreshes counters. The record delete is never rolled back when the
    /// image removal fails.
    pub async fn delete(&self, external_id: &str) -> Result<T, DomainError> {
        let removed = self
            .store
            .find_one_and_delete(external_id)
            .await?
            .ok_or_else(|| self.not_found())?;

        if let Some(path) = removed.image_path() {
            self.images.delete(path).await;
        }
        self.counters.refresh(self.kind, self.store.as_ref()).await?;
        info!(kind = %self.kind, id = external_id, "record deleted");
        Ok(removed)
    }

    /// Bulk delete by external id. Counters refresh once afterwards; images
    /// of every removed record are released.
    pub async fn delete_many(&self, external_ids: &[String]) -> Result<u64, DomainError> {
        let removed = self.store.delete_many(external_ids).await?;
        for record in &removed {
            if let Some(path) = record.image_path() {
                self.images.delete(path).await;
            }
        }
        self.counters.refresh(self.kind, self.store.as_ref()).await?;
        Ok(removed.len() as u64)
    }

    /// Last persisted counter snapshot. `None` for uncountable kinds or
    /// before the first mutation.
    pub async fn counts(&self) -> Result<Option<CounterSnapshot>, DomainError> {
        self.counters.current(self.kind).await
    }

    /// Recomputes the snapshot before reading it — used by list endpoints to
    /// self-heal a refresh missed by a crash in an earlier request.
    pub async fn refreshed_counts(&self) -> Result<Option<CounterSnapshot>, DomainError> {
        self.counters.refresh(self.kind, self.store.as_ref()).await
    }

    fn not_found(&self) -> DomainError {
        DomainError::not_found(format!("{} not found", self.kind.label()))
    }
}
