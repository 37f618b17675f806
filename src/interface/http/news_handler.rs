//! Campus and university news share one record shape and one set of
//! handler bodies; the route decides which feed's service is used.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::NaiveDate;

use crate::application::entity_service::{EntityService, RecordDraft};
use crate::application::projection::{Projected, project, project_all};
use crate::domain::errors::DomainError;
use crate::domain::records::NewsItem;
use crate::infrastructure::image_store::StagedUpload;
use crate::interface::http::reply::{ApiReply, ApiResult};
use crate::interface::http::upload::MutationForm;
use crate::interface::http::request_origin;
use crate::state::AppState;

struct NewNews {
    title: String,
    description: Option<String>,
    date: NaiveDate,
}

impl NewNews {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            title: form.required("title")?,
            description: form.optional("description"),
            date: form.required_date("date")?,
        })
    }

    fn into_item(self, draft: RecordDraft) -> NewsItem {
        NewsItem {
            news_id: draft.external_id,
            title: self.title,
            description: self.description,
            date: self.date,
            image: draft.image_path,
            created_at: draft.now,
            updated_at: draft.now,
        }
    }
}

struct NewsPatch {
    title: Option<String>,
    description: Option<String>,
    date: Option<NaiveDate>,
}

impl NewsPatch {
    fn from_form(form: &MutationForm) -> Result<Self, DomainError> {
        Ok(Self {
            title: form.optional("title"),
            description: form.optional("description"),
            date: form.optional_date("date")?,
        })
    }

    fn apply(self, item: &mut NewsItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        if let Some(date) = self.date {
            item.date = date;
        }
    }
}

async fn add_item(
    service: &EntityService<NewsItem>,
    image: Option<StagedUpload>,
    payload: NewNews,
) -> Result<NewsItem, DomainError> {
    service
        .create(image, |draft| payload.into_item(draft))
        .await
}

pub async fn add_campus_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<NewsItem>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let payload = NewNews::from_form(&form)?;

    let item = add_item(&state.campus_news, image, payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiReply::with_data("Campus news added successfully!", project(&origin, item)),
    ))
}

pub async fn add_university_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, ApiReply<Projected<NewsItem>>)> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let payload = NewNews::from_form(&form)?;

    let item = add_item(&state.university_news, image, payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiReply::with_data(
            "University news added successfully!",
            project(&origin, item),
        ),
    ))
}

pub async fn list_campus_news(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<NewsItem>>>> {
    let origin = request_origin(&headers);
    let items = state.campus_news.list().await?;
    Ok(ApiReply::with_data(
        "Campus news fetched successfully",
        project_all(&origin, items),
    ))
}

pub async fn list_university_news(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<ApiReply<Vec<Projected<NewsItem>>>> {
    let origin = request_origin(&headers);
    let items = state.university_news.list().await?;
    Ok(ApiReply::with_data(
        "University news fetched successfully",
        project_all(&origin, items),
    ))
}

pub async fn get_campus_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(news_id): Path<String>,
) -> ApiResult<ApiReply<Projected<NewsItem>>> {
    let origin = request_origin(&headers);
    let item = state.campus_news.get(&news_id).await?;
    Ok(ApiReply::with_data(
        "Campus news fetched successfully",
        project(&origin, item),
    ))
}

pub async fn get_university_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(news_id): Path<String>,
) -> ApiResult<ApiReply<Projected<NewsItem>>> {
    let origin = request_origin(&headers);
    let item = state.university_news.get(&news_id).await?;
    Ok(ApiReply::with_data(
        "University news fetched successfully",
        project(&origin, item),
    ))
}

pub async fn update_campus_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(news_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<NewsItem>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let patch = NewsPatch::from_form(&form)?;

    let item = state
        .campus_news
        .update(&news_id, image, |item| patch.apply(item))
        .await?;
    Ok(ApiReply::with_data(
        "Campus news updated successfully",
        project(&origin, item),
    ))
}

pub async fn update_university_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(news_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ApiReply<Projected<NewsItem>>> {
    let origin = request_origin(&headers);
    let mut form = MutationForm::read(multipart).await?;
    let image = form.take_image();
    let patch = NewsPatch::from_form(&form)?;

    let item = state
        .university_news
        .update(&news_id, image, |item| patch.apply(item))
        .await?;
    Ok(ApiReply::with_data(
        "University news updated successfully",
        project(&origin, item),
    ))
}

pub async fn delete_campus_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.campus_news.delete(&news_id).await?;
    Ok(ApiReply::message("Campus news deleted successfully"))
}

pub async fn delete_university_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state.university_news.delete(&news_id).await?;
    Ok(ApiReply::message("University news deleted successfully"))
}
