//! Room handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use campusdesk_entity::room::Room;

use crate::dto::request::{CreateRoomRequest, UpdateRoomRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/admin/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Room>>, ApiError> {
    Ok(Json(state.services.rooms.list(&auth).await?))
}

/// POST /api/admin/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let room = state.services.rooms.create(&auth, req.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PATCH /api/admin/rooms/{id}
pub async fn update_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let id = parse_uuid(&id)?;
    let room = state
        .services
        .rooms
        .update(&auth, id, req.into_patch()?)
        .await?;
    Ok(Json(room))
}

/// DELETE /api/admin/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    state.services.rooms.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Room deleted")))
}
