//! Student placements and rank holders.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};

use crate::application::projection::{Projected, project, project_all};
use crate::domain::errors::DomainError;
use crate::domain::records::{Placement, RankHolder};
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

// ---------------- Placements ----------------

pub async fn add_placement(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<Placement>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();

    let (name, company, designation, salary, location) = (
        form.optional("name"),
        form.optional("company"),
        form.optional("designation"),
        form.optional("salary"),
        form.optional("location"),
    );
    let (Some(name), Some(company), Some(designation), Some(salary), Some(location)) =
        (name, company, designation, salary, location)
    else {
        return Err(DomainError::validation("All fields are required.").into());
    };

    let placement = state
        .placements
        .create(image, |draft| Placement {
            placement_id: draft.external_id,
            name,
            company,
            designation,
            salary,
            location,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Placement added successfully!", project(&origin, placement)),
    ))
}

pub async fn list_placements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<Placement>>>> {
    let origin = request_origin(&headers);
    let placements = state.placements.list().await?;
    Ok(ApiReply::with_data(
        "Placements fetched successfully",
        project_all(&origin, placements),
    ))
}

pub async fn update_placement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(placement_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<Placement>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();

    let name = form.optional("name");
    let company = form.optional("company");
    let designation = form.optional("designation");
    let salary = form.optional("salary");
    let location = form.optional("location");

    let placement = state
        .placements
        .update(&placement_id, image, |placement| {
            if let Some(name) = name {
                placement.name = name;
            }
            if let Some(company) = company {
                placement.company = company;
            }
            if let Some(designation) = designation {
                placement.designation = designation;
            }
            if let Some(salary) = salary {
                placement.salary = salary;
            }
            if let Some(location) = location {
                placement.location = location;
            }
        })
        .await?;

    Ok(ApiReply::with_data(
        "Placement updated successfully",
        project(&origin, placement),
    ))
}

pub async fn delete_placement(
    State(state): State<AppState>,
    Path(placement_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.placements.delete(&placement_id).await?;
    Ok(ApiReply::message("Placement deleted successfully"))
}

// ---------------- Rank holders ----------------

pub async fn add_rank_holder(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<RankHolder>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();

    let (name, contact, place, rank, course, mark) = (
        form.optional("name"),
        form.optional("contact"),
        form.optional("place"),
        form.optional("rank"),
        form.optional("course"),
        form.optional("mark"),
    );
    let (Some(name), Some(contact), Some(place), Some(rank), Some(course), Some(mark)) =
        (name, contact, place, rank, course, mark)
    else {
        return Err(DomainError::validation("All required fields must be filled.").into());
    };
    let department = form.optional("department");

    let holder = state
        .rank_holders
        .create(image, |draft| RankHolder {
            rank_holder_id: draft.external_id,
            name,
            contact,
            place,
            rank,
            department,
            course,
            mark,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Rank holder added successfully!", project(&origin, holder)),
    ))
}

pub async fn list_rank_holders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<RankHolder>>>> {
    let origin = request_origin(&headers);
    let holders = state.rank_holders.list().await?;
    Ok(ApiReply::with_data(
        "Rank holders fetched successfully",
        project_all(&origin, holders),
    ))
}

pub async fn update_rank_holder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(rank_holder_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<RankHolder>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();

    let name = form.optional("name");
    let contact = form.optional("contact");
    let place = form.optional("place");
    let rank = form.optional("rank");
    let department = form.optional("department");
    let course = form.optional("course");
    let mark = form.optional("mark");

    let holder = state
        .rank_holders
        .update(&rank_holder_id, image, |holder| {
            if let Some(name) = name {
                holder.name = name;
            }
            if let Some(contact) = contact {
                holder.contact = contact;
            }
            if let Some(place) = place {
                holder.place = place;
            }
            if let Some(rank) = rank {
                holder.rank = rank;
            }
            if let Some(department) = department {
                holder.department = Some(department);
            }
            if let Some(course) = course {
                holder.course = course;
            }
            if let Some(mark) = mark {
                holder.mark = mark;
            }
        })
        .await?;

    Ok(ApiReply::with_data(
        "Rank holder updated successfully",
        project(&origin, holder),
    ))
}

pub async fn delete_rank_holder(
    State(state): State<AppState>,
    Path(rank_holder_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.rank_holders.delete(&rank_holder_id).await?;
    Ok(ApiReply::message("Rank holder deleted successfully"))
}
