//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use campusdesk_entity::user::UserProfile;

use crate::dto::request::{CreateUserRequest, ResetPasswordRequest, UpdateUserRequest, validated};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    Ok(Json(state.services.users.list_users(&auth).await?))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let user = state
        .services
        .users
        .create_user(&auth, req.into_input()?)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.services.users.get_user(&auth, id).await?))
}

/// PATCH /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let id = parse_uuid(&id)?;
    let user = state
        .services
        .users
        .update_user(&auth, id, req.into_patch()?)
        .await?;
    Ok(Json(user))
}

/// PUT /api/admin/users/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let req = validated(req)?;
    state
        .services
        .users
        .reset_password(&auth, id, &req.password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    state.services.users.delete_user(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
