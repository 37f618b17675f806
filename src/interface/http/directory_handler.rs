//! Faculty and board-member directories. The two shapes differ only by the
//! board member's type tag and identifier style.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;

use crate::application::entity_service::RecordDraft;
use crate::application::projection::{Projected, project, project_all};
use crate::domain::errors::DomainError;
use crate::domain::records::{BoardMember, BoardMemberType, FacultyMember};
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

struct PersonFields {
    name: String,
    email: String,
    contact: String,
    place: String,
    job_title: String,
    category: String,
    department: String,
}

impl PersonFields {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            name: form.required("name")?,
            email: form.required("email")?,
            contact: form.required("contact")?,
            place: form.required("place")?,
            job_title: form.required("jobTitle")?,
            category: form.required("category")?,
            department: form.required("department")?,
        })
    }
}

struct PersonPatch {
    name: Option<String>,
    email: Option<String>,
    contact: Option<String>,
    place: Option<String>,
    job_title: Option<String>,
    category: Option<String>,
    department: Option<String>,
}

impl PersonPatch {
    fn from_form(form: &MutationForm) -> Self {
        Self {
            name: form.optional("name"),
            email: form.optional("email"),
            contact: form.optional("contact"),
            place: form.optional("place"),
            job_title: form.optional("jobTitle"),
            category: form.optional("category"),
            department: form.optional("department"),
        }
    }
}

fn parse_member_type(raw: &str) -> Result<BoardMemberType, DomainError> {
    BoardMemberType::parse(raw).ok_or_else(|| DomainError::validation("Invalid member type."))
}

// ---------------- Faculty ----------------

pub async fn add_faculty(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<FacultyMember>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let person = PersonFields::from_form(&form)?;

    let faculty = state
        .faculty
        .create(image, |draft| FacultyMember {
            faculty_id: draft.external_id,
            name: person.name,
            email: person.email,
            contact: person.contact,
            place: person.place,
            job_title: person.job_title,
            category: person.category,
            department: person.department,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Faculty added successfully!", project(&origin, faculty)),
    ))
}

pub async fn list_faculty(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<FacultyMember>>>> {
    let origin = request_origin(&headers);
    let members = state.faculty.list().await?;
    Ok(ApiReply::with_data(
        "Faculty fetched successfully",
        project_all(&origin, members),
    ))
}

pub async fn update_faculty(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(faculty_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<FacultyMember>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let patch = PersonPatch::from_form(&form);

    let faculty = state
        .faculty
        .update(&faculty_id, image, |member| {
            if let Some(name) = patch.name {
                member.name = name;
            }
            if let Some(email) = patch.email {
                member.email = email;
            }
            if let Some(contact) = patch.contact {
                member.contact = contact;
            }
            if let Some(place) = patch.place {
                member.place = place;
            }
            if let Some(job_title) = patch.job_title {
                member.job_title = job_title;
            }
            if let Some(category) = patch.category {
                member.category = category;
            }
            if let Some(department) = patch.department {
                member.department = department;
            }
        })
        .await?;

    Ok(ApiReply::with_data(
        "Faculty updated successfully",
        project(&origin, faculty),
    ))
}

pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.faculty.delete(&faculty_id).await?;
    Ok(ApiReply::message("Faculty deleted successfully"))
}

// ---------------- Board members ----------------

#[derive(Debug, Deserialize)]
pub struct BoardMemberQuery {
    #[serde(rename = "type")]
    pub member_type: Option<String>,
}

pub async fn add_board_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<BoardMember>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let person = PersonFields::from_form(&form)?;
    let member_type = match form.optional("type") {
        Some(raw) => parse_member_type(&raw)?,
        None => BoardMemberType::default(),
    };

    let member = state
        .board_members
        .create(image, |draft| BoardMember {
            member_id: draft.external_id,
            name: person.name,
            email: person.email,
            contact: person.contact,
            place: person.place,
            job_title: person.job_title,
            category: person.category,
            department: person.department,
            member_type,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Board member added successfully!", project(&origin, member)),
    ))
}

pub async fn list_board_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BoardMemberQuery>,
) -> ApiResult<ApiReply<Vec<Projected<BoardMember>>>> {
    let origin = request_origin(&headers);
    let mut members = state.board_members.list().await?;

    if let Some(raw) = query.member_type {
        let wanted = parse_member_type(&raw)?;
        members.retain(|member| member.member_type == wanted);
    }

    Ok(ApiReply::with_data(
        "Board members fetched successfully",
        project_all(&origin, members),
    ))
}

pub async fn update_board_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<BoardMember>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let patch = PersonPatch::from_form(&form);
    let member_type = form
        .optional("type")
        .map(|raw| parse_member_type(&raw))
        .transpose()?;

    let member = state
        .board_members
        .update(&member_id, image, |member| {
            if let Some(name) = patch.name {
                member.name = name;
            }
            if let Some(email) = patch.email {
                member.email = email;
            }
            if let Some(contact) = patch.contact {
                member.contact = contact;
            }
            if let Some(place) = patch.place {
                member.place = place;
            }
            if let Some(job_title) = patch.job_title {
                member.job_title = job_title;
            }
            if let Some(category) = patch.category {
                member.category = category;
            }
            if let Some(department) = patch.department {
                member.department = department;
            }
            if let Some(member_type) = member_type {
                member.member_type = member_type;
            }
        })
        .await?;

    Ok(ApiReply::with_data(
        "Board member updated successfully",
        project(&origin, member),
    ))
}

pub async fn delete_board_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.board_members.delete(&member_id).await?;
    Ok(ApiReply::message("Board member deleted successfully"))
}
