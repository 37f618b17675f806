//! Response envelope shared by every endpoint: a status flag, a
//! human-readable message, optional data, and an optional error detail.
//! Domain failures map onto it with the matching HTTP status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ApiReply<T: Serialize> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiReply<serde_json::Value> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> ApiReply<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message, detail) = match self.0 {
            DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message, None),
            DomainError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, None),
            DomainError::Forbidden(message) => (StatusCode::FORBIDDEN, message, None),
            DomainError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            DomainError::Conflict(message) => (StatusCode::CONFLICT, message, None),
            DomainError::Storage(detail)
            | DomainError::Filesystem(detail)
            | DomainError::Internal(detail) => {
                error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(detail),
                )
            }
        };

        let body = Json(ErrorBody {
            status: false,
            message,
            error: detail,
        });
        (code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_without_data_omits_the_field() {
        let value = serde_json::to_value(ApiReply::message("done")).unwrap();
        assert_eq!(value["status"], true);
        assert_eq!(value["message"], "done");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::from(DomainError::not_found("Event not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_errors_map_to_500() {
        let response = ApiError::from(DomainError::Storage("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
