use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};

use crate::application::projection::{Projected, project, project_all};
use crate::domain::errors::DomainError;
use crate::domain::records::Testimonial;
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

pub async fn add_testimonial(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<Testimonial>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();

    let text = form.required("text")?;
    let name = form.required("name")?;
    let profession = form.required("profession")?;
    // Testimonials always carry a portrait.
    if image.is_none() {
        return Err(DomainError::validation("image is required").into());
    }

    let testimonial = state
        .testimonials
        .create(image, |draft| Testimonial {
            testimonial_id: draft.external_id,
            text,
            name,
            profession,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data(
            "Testimonial added successfully!",
            project(&origin, testimonial),
        ),
    ))
}

pub async fn list_testimonials(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<Testimonial>>>> {
    let origin = request_origin(&headers);
    let testimonials = state.testimonials.list().await?;
    Ok(ApiReply::with_data(
        "Testimonials fetched successfully",
        project_all(&origin, testimonials),
    ))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(testimonial_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.testimonials.delete(&testimonial_id).await?;
    Ok(ApiReply::message("Testimonial deleted successfully"))
}
