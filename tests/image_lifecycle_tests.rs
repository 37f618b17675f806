mod common;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use campus_admin_api::application::counter::CounterService;
use campus_admin_api::application::entity_service::EntityService;
use campus_admin_api::domain::kind::{EventStatus, Kind};
use campus_admin_api::domain::records::Event;
use campus_admin_api::infrastructure::image_store::{ImageStore, StagedUpload};
use campus_admin_api::infrastructure::memory::MemoryCounterStore;
use campus_admin_api::infrastructure::{RecordStore, StoreError};
use common::{admin_token, delete_request, get_request, multipart_request, relative_image_path, send, test_app};

// Tiny valid-enough PNG payload; the store never inspects pixel data.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

const EVENT_FIELDS: &[(&str, &str)] = &[
    ("title", "Gallery Night"),
    ("eventDate", "2025-03-01"),
    ("endDate", "2025-03-01"),
    ("totalSlots", "50"),
    ("category", "cultural"),
    ("location", "Gallery"),
];

#[tokio::test]
async fn deleting_a_record_removes_its_image_file() {
    let harness = test_app();
    let token = admin_token(&harness.state).await;

    let (status, created) = send(
        harness.app.clone(),
        multipart_request(
            "POST",
            "/create-Event",
            Some(&token),
            EVENT_FIELDS,
            Some(("poster.png", "image/png", PNG_BYTES)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let image_url = created["data"]["imageUrl"].as_str().expect("image url");
    let relative = relative_image_path(image_url);
    assert!(relative.starts_with("uploads/events/"));
    let on_disk = harness.public.path().join(&relative);
    assert!(on_disk.is_file(), "uploaded file should exist on disk");

    let event_id = created["data"]["eventId"].as_str().unwrap().to_string();
    let (status, _) = send(
        harness.app.clone(),
        delete_request(&format!("/deleteEvent/{event_id}"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!on_disk.exists(), "image must be released with its record");
}

#[tokio::test]
async fn replacing_an_image_deletes_the_old_file() {
    let harness = test_app();
    let token = admin_token(&harness.state).await;

    let (_, created) = send(
        harness.app.clone(),
        multipart_request(
            "POST",
            "/create-Event",
            Some(&token),
            EVENT_FIELDS,
            Some(("old.png", "image/png", PNG_BYTES)),
        ),
    )
    .await;
    let event_id = created["data"]["eventId"].as_str().unwrap().to_string();
    let old_relative = relative_image_path(created["data"]["imageUrl"].as_str().unwrap());

    let (status, updated) = send(
        harness.app.clone(),
        multipart_request(
            "PUT",
            &format!("/updateEvent/{event_id}"),
            Some(&token),
            &[],
            Some(("new.jpg", "image/jpeg", PNG_BYTES)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let new_relative = relative_image_path(updated["data"]["imageUrl"].as_str().unwrap());
    assert_ne!(old_relative, new_relative);
    assert!(new_relative.ends_with(".jpg"));
    assert!(!harness.public.path().join(&old_relative).exists());
    assert!(harness.public.path().join(&new_relative).is_file());
}

#[tokio::test]
async fn update_without_image_retains_the_existing_path() {
    let harness = test_app();
    let token = admin_token(&harness.state).await;

    let (_, created) = send(
        harness.app.clone(),
        multipart_request(
            "POST",
            "/create-Event",
            Some(&token),
            EVENT_FIELDS,
            Some(("keep.png", "image/png", PNG_BYTES)),
        ),
    )
    .await;
    let event_id = created["data"]["eventId"].as_str().unwrap().to_string();
    let relative = relative_image_path(created["data"]["imageUrl"].as_str().unwrap());

    let (_, updated) = send(
        harness.app.clone(),
        multipart_request(
            "PUT",
            &format!("/updateEvent/{event_id}"),
            Some(&token),
            &[("title", "Renamed")],
            None,
        ),
    )
    .await;

    assert_eq!(updated["data"]["title"], "Renamed");
    assert_eq!(
        relative_image_path(updated["data"]["imageUrl"].as_str().unwrap()),
        relative
    );
    assert!(harness.public.path().join(&relative).is_file());
}

#[tokio::test]
async fn rejected_upload_fails_before_any_mutation() {
    let harness = test_app();
    let token = admin_token(&harness.state).await;

    let (status, body) = send(
        harness.app.clone(),
        multipart_request(
            "POST",
            "/create-Event",
            Some(&token),
            EVENT_FIELDS,
            Some(("script.exe", "application/octet-stream", PNG_BYTES)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only image files are allowed");

    let (_, listed) = send(harness.app.clone(), get_request("/getEvents", None)).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
    assert!(!harness.public.path().join("uploads/events").exists());
}

/// Store stub whose insert always fails, to exercise the compensating image
/// deletion on the create path.
struct FailingStore;

#[async_trait]
impl RecordStore<Event> for FailingStore {
    async fn insert(&self, _record: Event) -> Result<Event, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Event>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_one(&self, _external_id: &str) -> Result<Option<Event>, StoreError> {
        Ok(None)
    }

    async fn replace(&self, _external_id: &str, _record: Event) -> Result<Option<Event>, StoreError> {
        Ok(None)
    }

    async fn find_one_and_delete(&self, _external_id: &str) -> Result<Option<Event>, StoreError> {
        Ok(None)
    }

    async fn delete_many(&self, _external_ids: &[String]) -> Result<Vec<Event>, StoreError> {
        Ok(Vec::new())
    }

    async fn count_by_status(&self) -> Result<HashMap<String, u64>, StoreError> {
        Ok(HashMap::new())
    }
}

#[tokio::test]
async fn failed_persist_deletes_the_freshly_saved_image() {
    let public = tempfile::tempdir().unwrap();
    let images = Arc::new(ImageStore::new(public.path()));
    let service: EntityService<Event> = EntityService::new(
        Kind::Event,
        Arc::new(FailingStore),
        CounterService::new(Arc::new(MemoryCounterStore::new())),
        Arc::clone(&images),
    );

    let upload =
        StagedUpload::checked("poster.png".to_string(), "image/png", PNG_BYTES.to_vec()).unwrap();
    let now = chrono::Utc::now();
    let result = service
        .create(Some(upload), |draft| Event {
            event_id: draft.external_id,
            title: "Doomed".to_string(),
            description: None,
            target_audience: None,
            event_date: now.date_naive(),
            end_date: now.date_naive(),
            category: "cultural".to_string(),
            location: "Hall".to_string(),
            total_slots: 10,
            booked_slots: 0,
            event_status: EventStatus::Upcoming,
            image: draft.image_path,
            website: None,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await;

    assert!(result.is_err());
    let events_dir = public.path().join("uploads/events");
    let leftover = std::fs::read_dir(&events_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0, "no orphan file may remain after a failed create");
}
