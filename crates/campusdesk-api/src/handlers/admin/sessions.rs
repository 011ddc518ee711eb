//! Live session handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use campusdesk_entity::session::LiveSession;

use crate::dto::request::{StartSessionRequest, UpdateSessionRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/admin/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<LiveSession>>, ApiError> {
    Ok(Json(state.services.sessions.list(&auth).await?))
}

/// GET /api/admin/sessions/active
pub async fn list_active(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<LiveSession>>, ApiError> {
    Ok(Json(state.services.sessions.list_active(&auth).await?))
}

/// POST /api/admin/sessions
pub async fn start_session(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<StartSessionRequest>,
) -> Result<(StatusCode, Json<LiveSession>), ApiError> {
    let session = state
        .services
        .sessions
        .start(&auth, req.into_new()?)
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// PATCH /api/admin/sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateSessionRequest>,
) -> Result<Json<LiveSession>, ApiError> {
    let id = parse_uuid(&id)?;
    let session = state
        .services
        .sessions
        .update(&auth, id, req.into())
        .await?;
    Ok(Json(session))
}

/// POST /api/admin/sessions/{id}/end
pub async fn end_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<LiveSession>, ApiError> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.services.sessions.end(&auth, id).await?))
}

/// DELETE /api/admin/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    state.services.sessions.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Session deleted")))
}
