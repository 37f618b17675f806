use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::counter::CounterSnapshot;
use crate::domain::errors::DomainError;
use crate::domain::kind::ContactStatus;
use crate::domain::records::ContactMessage;
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub terms_accepted: bool,
}

impl SubmitContactRequest {
    fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub contact_id: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct ContactListReply {
    pub status: bool,
    pub message: String,
    pub data: Vec<ContactMessage>,
    #[serde(rename = "contactCount", skip_serializing_if = "Option::is_none")]
    pub contact_count: Option<CounterSnapshot>,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<SubmitContactRequest>,
) -> ApiResult<(StatusCode, ApiReply<serde_json::Value>)> {
    request.validate()?;

    let contact = state
        .contacts
        .create(None, |draft| ContactMessage {
            contact_id: draft.external_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            subject: request.subject,
            message: request.message,
            terms_accepted: request.terms_accepted,
            status: ContactStatus::default(),
            submitted_at: draft.now,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data(
            "Message submitted successfully",
            json!({ "contactId": contact.contact_id }),
        ),
    ))
}

pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<ContactListReply>> {
    let data = state.contacts.list().await?;
    let contact_count = state.contacts.counts().await?;
    Ok(Json(ContactListReply {
        status: true,
        message: "Contacts fetched".to_string(),
        data,
        contact_count,
    }))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> ApiResult<ApiReply<ContactMessage>> {
    let contact = state.contacts.get(&contact_id).await?;
    Ok(ApiReply::with_data("Contact fetched", contact))
}

/// Live histogram of contact statuses, recomputed on read so a refresh
/// missed by an earlier crash self-heals here.
pub async fn contact_counts(
    State(state): State<AppState>,
) -> ApiResult<ApiReply<CounterSnapshot>> {
    let snapshot = state
        .contacts
        .refreshed_counts()
        .await?
        .ok_or_else(|| DomainError::internal("contact counts unavailable"))?;
    Ok(ApiReply::with_data("Contact counts fetched", snapshot))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Json(request): Json<UpdateContactRequest>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    let status: ContactStatus = request.status.parse()?;

    state
        .contacts
        .update(&request.contact_id, None, |contact| {
            contact.status = status;
        })
        .await?;

    Ok(ApiReply::message("Status updated"))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.contacts.delete(&contact_id).await?;
    Ok(ApiReply::message("Contact deleted"))
}
