use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::counter::CounterSnapshot;
use crate::domain::errors::DomainError;
use crate::domain::kind::Kind;
use crate::domain::records::Record;
use crate::infrastructure::{CounterStore, RecordStore};

/// Rebuilds status histograms for countable kinds and persists them as
/// singleton snapshots. Always a full recompute from the record set —
/// occasional extra work is preferred over drift from missed increments
/// under interleaving writers.
#[derive(Clone)]
pub struct CounterService {
    counters: Arc<dyn CounterStore>,
}

impl CounterService {
    pub fn new(counters: Arc<dyn CounterStore>) -> Self {
        Self { counters }
    }

    /// Recomputes and upserts the snapshot for `kind`. A no-op returning
    /// `None` for kinds without a status workflow.
    pub async fn refresh<T: Record>(
        &self,
        kind: Kind,
        store: &dyn RecordStore<T>,
    ) -> Result<Option<CounterSnapshot>, DomainError> {
        let Some(statuses) = kind.statuses() else {
            return Ok(None);
        };

        let grouped = store.count_by_status().await?;
        let snapshot = CounterSnapshot::from_grouped(statuses, &grouped, Utc::now());
        debug!(%kind, total = snapshot.total, "refreshed counter snapshot");

        let stored = self.counters.upsert(kind, snapshot).await?;
        Ok(Some(stored))
    }

    /// Last persisted snapshot, without triggering a recompute. `None` when
    /// no mutation has run yet for the kind.
    pub async fn current(&self, kind: Kind) -> Result<Option<CounterSnapshot>, DomainError> {
        Ok(self.counters.get(kind).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::kind::EnquiryStatus;
    use crate::domain::records::{Enquiry, Sex};
    use crate::infrastructure::memory::{MemoryCounterStore, MemoryRecordStore};

    fn enquiry(id: &str, status: EnquiryStatus) -> Enquiry {
        let now = Utc::now();
        Enquiry {
            form_id: id.to_string(),
            name: "A".to_string(),
            father_name: "B".to_string(),
            mother_name: "C".to_string(),
            contact_no: "1".to_string(),
            present_address: "addr".to_string(),
            nationality: "IN".to_string(),
            area_of_study: "science".to_string(),
            course: "BSc".to_string(),
            email: "a@b.c".to_string(),
            referred_by: String::new(),
            dob: now.date_naive(),
            sex: Sex::Female,
            comments: None,
            form_status: status,
            form_viewed_status: false,
            submitted_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn refresh_rebuilds_full_histogram() {
        let store = MemoryRecordStore::new();
        store.insert(enquiry("1", EnquiryStatus::Pending)).await.unwrap();
        store.insert(enquiry("2", EnquiryStatus::Pending)).await.unwrap();
        store.insert(enquiry("3", EnquiryStatus::Approved)).await.unwrap();

        let service = CounterService::new(Arc::new(MemoryCounterStore::new()));
        let snapshot = service
            .refresh(Kind::Enquiry, &store)
            .await
            .unwrap()
            .expect("enquiries are countable");

        assert_eq!(snapshot.count("pending"), 2);
        assert_eq!(snapshot.count("approved"), 1);
        assert_eq!(snapshot.count("rejected"), 0);
        assert_eq!(snapshot.count("completed"), 0);
        assert_eq!(snapshot.total, 3);
    }

    #[tokio::test]
    async fn refresh_is_a_noop_for_uncountable_kinds() {
        let store: MemoryRecordStore<crate::domain::records::Course> = MemoryRecordStore::new();
        let service = CounterService::new(Arc::new(MemoryCounterStore::new()));

        let refreshed = service.refresh(Kind::Course, &store).await.unwrap();
        assert!(refreshed.is_none());
        assert!(service.current(Kind::Course).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_refresh_creates_the_snapshot() {
        let store: MemoryRecordStore<Enquiry> = MemoryRecordStore::new();
        let service = CounterService::new(Arc::new(MemoryCounterStore::new()));

        assert!(service.current(Kind::Enquiry).await.unwrap().is_none());
        service.refresh(Kind::Enquiry, &store).await.unwrap();

        let snapshot = service.current(Kind::Enquiry).await.unwrap().unwrap();
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.count("pending"), 0);
    }
}
