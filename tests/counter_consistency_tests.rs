//! Counter-consistency properties exercised at the service layer: after any
//! sequence of creates, status updates, and deletes followed by a refresh,
//! the snapshot total equals the sum of its buckets and the number of live
//! records.

mod common;

use campus_admin_api::domain::kind::EventStatus;
use campus_admin_api::domain::records::Event;
use chrono::NaiveDate;
use common::test_app;

fn fest(date: &str) -> impl FnOnce(campus_admin_api::application::entity_service::RecordDraft) -> Event {
    let date: NaiveDate = date.parse().unwrap();
    move |draft| Event {
        event_id: draft.external_id,
        title: "Fest".to_string(),
        description: None,
        target_audience: None,
        event_date: date,
        end_date: date,
        category: "cultural".to_string(),
        location: "Main Hall".to_string(),
        total_slots: 100,
        booked_slots: 0,
        event_status: EventStatus::Upcoming,
        image: draft.image_path,
        website: None,
        created_at: draft.now,
        updated_at: draft.now,
    }
}

#[tokio::test]
async fn snapshot_total_matches_live_records_after_mixed_mutations() {
    let harness = test_app();
    let events = &harness.state.events;

    let mut ids = Vec::new();
    for day in 1..=5 {
        let created = events
            .create(None, fest(&format!("2025-02-0{day}")))
            .await
            .unwrap();
        ids.push(created.event_id);
    }

    events
        .update(&ids[0], None, |event| {
            event.event_status = EventStatus::Completed;
        })
        .await
        .unwrap();
    events
        .update(&ids[1], None, |event| {
            event.event_status = EventStatus::Canceled;
        })
        .await
        .unwrap();
    events.delete(&ids[2]).await.unwrap();

    let snapshot = events
        .refreshed_counts()
        .await
        .unwrap()
        .expect("events are countable");

    let live = events.list().await.unwrap();
    assert_eq!(snapshot.total, live.len() as u64);
    assert_eq!(snapshot.total, snapshot.counts.values().sum::<u64>());
    assert_eq!(snapshot.count("completed"), 1);
    assert_eq!(snapshot.count("canceled"), 1);
    assert_eq!(snapshot.count("upcoming"), 2);
}

#[tokio::test]
async fn snapshot_is_fully_recomputable_from_records() {
    let harness = test_app();
    let events = &harness.state.events;

    let created = events.create(None, fest("2025-07-01")).await.unwrap();

    // Two consecutive refreshes agree bucket for bucket: the snapshot is a
    // cache over the record set, not an accumulating counter.
    let first = events.refreshed_counts().await.unwrap().unwrap();
    let second = events.refreshed_counts().await.unwrap().unwrap();
    assert_eq!(first.counts, second.counts);
    assert_eq!(first.total, second.total);

    events.delete(&created.event_id).await.unwrap();
    let emptied = events.refreshed_counts().await.unwrap().unwrap();
    assert_eq!(emptied.total, 0);
    assert_eq!(emptied.counts.values().sum::<u64>(), 0);
}
