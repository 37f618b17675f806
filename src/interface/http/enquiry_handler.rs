use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::counter::CounterSnapshot;
use crate::domain::errors::DomainError;
use crate::domain::kind::EnquiryStatus;
use crate::domain::records::{Enquiry, Sex};
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEnquiryRequest {
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub contact_no: String,
    pub present_address: String,
    pub nationality: String,
    pub area_of_study: String,
    pub course: String,
    pub email: String,
    #[serde(default)]
    pub referred_by: String,
    pub dob: NaiveDate,
    pub sex: Sex,
    pub comments: Option<String>,
}

impl SubmitEnquiryRequest {
    fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("name", &self.name),
            ("fatherName", &self.father_name),
            ("motherName", &self.mother_name),
            ("contactNo", &self.contact_no),
            ("presentAddress", &self.present_address),
            ("nationality", &self.nationality),
            ("areaOfStudy", &self.area_of_study),
            ("course", &self.course),
            ("email", &self.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation("email must be a valid address"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnquiryRequest {
    pub form_id: String,
    pub status: String,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEnquiriesRequest {
    pub form_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct EnquiryListReply {
    pub status: bool,
    pub message: String,
    pub data: Vec<Enquiry>,
    #[serde(rename = "formCount", skip_serializing_if = "Option::is_none")]
    pub form_count: Option<CounterSnapshot>,
}

pub async fn submit_enquiry(
    State(state): State<AppState>,
    Json(request): Json<SubmitEnquiryRequest>,
) -> ApiResult<(StatusCode, ApiReply<serde_json::Value>)> {
    request.validate()?;

    let enquiry = state
        .enquiries
        .create(None, |draft| Enquiry {
            form_id: draft.external_id,
            name: request.name,
            father_name: request.father_name,
            mother_name: request.mother_name,
            contact_no: request.contact_no,
            present_address: request.present_address,
            nationality: request.nationality,
            area_of_study: request.area_of_study,
            course: request.course,
            email: request.email,
            referred_by: request.referred_by,
            dob: request.dob,
            sex: request.sex,
            comments: request.comments,
            form_status: EnquiryStatus::default(),
            form_viewed_status: false,
            submitted_at: draft.now,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data(
            "Enquiry submitted successfully",
            json!({ "formId": enquiry.form_id }),
        ),
    ))
}

pub async fn list_enquiries(State(state): State<AppState>) -> ApiResult<Json<EnquiryListReply>> {
    let data = state.enquiries.list().await?;
    let form_count = state.enquiries.counts().await?;
    Ok(Json(EnquiryListReply {
        status: true,
        message: "Enquiries fetched successfully".to_string(),
        data,
        form_count,
    }))
}

pub async fn get_enquiry(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
) -> ApiResult<ApiReply<Enquiry>> {
    let enquiry = state.enquiries.get(&form_id).await?;
    Ok(ApiReply::with_data("Enquiry fetched successfully", enquiry))
}

pub async fn update_enquiry(
    State(state): State<AppState>,
    Json(request): Json<UpdateEnquiryRequest>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    let status: EnquiryStatus = request.status.parse()?;
    let comment = request.comment;

    state
        .enquiries
        .update(&request.form_id, None, |enquiry| {
            enquiry.form_status = status;
            if status == EnquiryStatus::Rejected {
                enquiry.comments =
                    Some(comment.unwrap_or_else(|| "No comment provided".to_string()));
            }
        })
        .await?;

    Ok(ApiReply::message("Enquiry status updated successfully"))
}

pub async fn delete_enquiry(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.enquiries.delete(&form_id).await?;
    Ok(ApiReply::message("Enquiry deleted successfully"))
}

pub async fn delete_enquiries(
    State(state): State<AppState>,
    Json(request): Json<DeleteEnquiriesRequest>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    if request.form_ids.is_empty() {
        return Err(DomainError::validation("formIds must not be empty").into());
    }
    let deleted = state.enquiries.delete_many(&request.form_ids).await?;
    Ok(ApiReply::with_data(
        "Enquiries deleted successfully",
        json!({ "deleted": deleted }),
    ))
}
