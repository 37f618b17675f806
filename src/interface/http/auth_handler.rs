use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use crate::domain::errors::DomainError;
use crate::interface::http::reply::{ApiError, ApiReply, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub super_admin_email: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAdminRequest {
    pub super_admin_email: String,
    pub admin_email: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<(StatusCode, ApiReply<serde_json::Value>)> {
    state
        .auth
        .signup_super_admin(&request.name, &request.email, &request.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiReply::message("Super Admin registered successfully"),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    let token = state.auth.login(&request.email, &request.password).await?;
    Ok(ApiReply::with_data(
        "Login successful",
        json!({ "token": token }),
    ))
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> ApiResult<(StatusCode, ApiReply<serde_json::Value>)> {
    state
        .auth
        .create_admin(
            &request.super_admin_email,
            &request.name,
            &request.email,
            &request.password,
            &request.code,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiReply::message("Admin created successfully"),
    ))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Json(request): Json<DeleteAdminRequest>,
) -> ApiResult<ApiReply<serde_json::Value>> {
    state
        .auth
        .delete_admin(&request.super_admin_email, &request.admin_email)
        .await?;
    Ok(ApiReply::message("Admin deleted successfully"))
}

/// Bearer-token gate in front of privileged routes. A missing credential is
/// 401, an invalid or expired one is 403; handlers behind the gate never see
/// principal details.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        return Err(DomainError::unauthorized("Unauthorized: Token missing").into());
    };
    state
        .auth
        .authenticate(token)
        .await
        .map_err(|_| DomainError::forbidden("Unauthorized: Invalid or expired token"))?;

    Ok(next.run(request).await)
}
