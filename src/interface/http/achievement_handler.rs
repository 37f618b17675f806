use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::NaiveDate;

use crate::application::entity_service::RecordDraft;
use crate::application::projection::{Projected, project, project_all};
use crate::domain::errors::DomainError;
use crate::domain::records::Achievement;
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

struct NewAchievement {
    title: String,
    description: String,
    achievement_type: String,
    date: NaiveDate,
}

impl NewAchievement {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            title: form.required("title")?,
            description: form.required("description")?,
            achievement_type: form
                .optional("achievementType")
                .unwrap_or_else(Achievement::default_type),
            date: form.required_date("date")?,
        })
    }

    fn into_achievement(self, draft: RecordDraft) -> Achievement {
        Achievement {
            achievement_id: draft.external_id,
            title: self.title,
            description: self.description,
            achievement_type: self.achievement_type,
            date: self.date,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        }
    }
}

pub async fn add_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<Achievement>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let payload = NewAchievement::from_form(&form)?;

    let achievement = state
        .achievements
        .create(image, |draft| payload.into_achievement(draft))
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiReply::with_data(
            "Achievement added successfully!",
            project(&origin, achievement),
        ),
    ))
}

pub async fn list_achievements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<Achievement>>>> {
    let origin = request_origin(&headers);
    let achievements = state.achievements.list().await?;
    Ok(ApiReply::with_data(
        "Achievements fetched successfully",
        project_all(&origin, achievements),
    ))
}

pub async fn get_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<String>,
) -> ApiResult<ApiReply<Projected<Achievement>>> {
    let origin = request_origin(&headers);
    let achievement = state.achievements.get(&achievement_id).await?;
    Ok(ApiReply::with_data(
        "Achievement fetched successfully",
        project(&origin, achievement),
    ))
}

pub async fn update_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<Achievement>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();

    let title = form.optional("title");
    let description = form.optional("description");
    let achievement_type = form.optional("achievementType");
    let date = form.optional_date("date")?;

    let achievement = state
        .achievements
        .update(&achievement_id, image, |achievement| {
            if let Some(title) = title {
                achievement.title = title;
            }
            if let Some(description) = description {
                achievement.description = description;
            }
            if let Some(achievement_type) = achievement_type {
                achievement.achievement_type = achievement_type;
            }
            if let Some(date) = date {
                achievement.date = date;
            }
        })
        .await?;

    Ok(ApiReply::with_data(
        "Achievement updated successfully",
        project(&origin, achievement),
    ))
}

pub async fn delete_achievement(
    State(state): State<AppState>,
    Path(achievement_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.achievements.delete(&achievement_id).await?;
    Ok(ApiReply::message("Achievement deleted successfully"))
}
