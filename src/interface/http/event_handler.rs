use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::NaiveDate;
use serde::Serialize;

use crate::application::entity_service::RecordDraft;
use crate::application::projection::{Projected, project, project_all};
use crate::domain::counter::CounterSnapshot;
use crate::domain::errors::DomainError;
use crate::domain::kind::EventStatus;
use crate::domain::records::Event;
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

struct NewEvent {
    title: String,
    description: Option<String>,
    target_audience: Option<String>,
    event_date: NaiveDate,
    end_date: NaiveDate,
    category: String,
    location: String,
    total_slots: u32,
    event_status: EventStatus,
    website: Option<String>,
}

impl NewEvent {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            title: form.required("title")?,
            description: form.optional("description"),
            target_audience: form.optional("targetAudience"),
            event_date: form.required_date("eventDate")?,
            end_date: form.required_date("endDate")?,
            category: form.required("category")?,
            location: form.required("location")?,
            total_slots: form.required_u32("totalSlots")?,
            event_status: match form.optional("eventStatus") {
                Some(raw) => raw.parse()?,
                None => EventStatus::default(),
            },
            website: form.optional("website"),
        })
    }

    fn into_event(self, draft: RecordDraft) -> Event {
        Event {
            event_id: draft.external_id,
            title: self.title,
            description: self.description,
            target_audience: self.target_audience,
            event_date: self.event_date,
            end_date: self.end_date,
            category: self.category,
            location: self.location,
            total_slots: self.total_slots,
            booked_slots: 0,
            event_status: self.event_status,
            image: draft.image_path,
            website: self.website,
            created_at: draft.now,
            updated_at: draft.now,
        }
    }
}

struct EventPatch {
    title: Option<String>,
    description: Option<String>,
    target_audience: Option<String>,
    event_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    category: Option<String>,
    location: Option<String>,
    total_slots: Option<u32>,
    event_status: Option<EventStatus>,
    website: Option<String>,
}

impl EventPatch {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            title: form.optional("title"),
            description: form.optional("description"),
            target_audience: form.optional("targetAudience"),
            event_date: form.optional_date("eventDate")?,
            end_date: form.optional_date("endDate")?,
            category: form.optional("category"),
            location: form.optional("location"),
            total_slots: form.optional_u32("totalSlots")?,
            event_status: form
                .optional("eventStatus")
                .map(|raw| raw.parse())
                .transpose()?,
            website: form.optional("website"),
        })
    }

    fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = Some(description);
        }
        if let Some(target_audience) = self.target_audience {
            event.target_audience = Some(target_audience);
        }
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        if let Some(end_date) = self.end_date {
            event.end_date = end_date;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(total_slots) = self.total_slots {
            event.total_slots = total_slots;
        }
        if let Some(event_status) = self.event_status {
            event.event_status = event_status;
        }
        if let Some(website) = self.website {
            event.website = Some(website);
        }
    }
}

#[derive(Serialize)]
pub struct EventListReply {
    pub status: bool,
    pub data: Vec<Projected<Event>>,
    #[serde(rename = "eventCount", skip_serializing_if = "Option::is_none")]
    pub event_count: Option<CounterSnapshot>,
}

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<Event>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let payload = NewEvent::from_form(&form)?;

    let event = state
        .events
        .create(image, |draft| payload.into_event(draft))
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Event created successfully", project(&origin, event)),
    ))
}

pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<EventListReply>> {
    let origin = request_origin(&headers);
    // Recompute before reading so the snapshot shown next to the list is
    // never stale across a missed refresh.
    let event_count = state.events.refreshed_counts().await?;
    let events = state.events.list().await?;

    Ok(Json(EventListReply {
        status: true,
        data: project_all(&origin, events),
        event_count,
    }))
}

pub async fn get_event_count(
    State(state): State<AppState>,
) -> ApiResult<ApiReply<CounterSnapshot>> {
    let snapshot = state
        .events
        .counts()
        .await?
        .ok_or_else(|| DomainError::not_found("Event count not found"))?;
    Ok(ApiReply::with_data("Event count fetched", snapshot))
}

pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> ApiResult<ApiReply<Projected<Event>>> {
    let origin = request_origin(&headers);
    let event = state.events.get(&event_id).await?;
    Ok(ApiReply::with_data(
        "Event fetched successfully",
        project(&origin, event),
    ))
}

pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<Event>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let patch = EventPatch::from_form(&form)?;

    let event = state
        .events
        .update(&event_id, image, |event| patch.apply(event))
        .await?;

    Ok(ApiReply::with_data(
        "Event updated successfully",
        project(&origin, event),
    ))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.events.delete(&event_id).await?;
    Ok(ApiReply::message("Event deleted successfully"))
}
