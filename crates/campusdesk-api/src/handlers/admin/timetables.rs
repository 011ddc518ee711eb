//! Timetable handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use campusdesk_entity::timetable::TimetableSlot;
use campusdesk_service::ClashReport;

use crate::dto::request::{CheckSlotRequest, CreateSlotRequest, TimetableQuery, UpdateSlotRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/admin/timetables?day=Monday
pub async fn list_slots(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<Vec<TimetableSlot>>, ApiError> {
    let slots = state.services.timetables.list(&auth, query.day()?).await?;
    Ok(Json(slots))
}

/// POST /api/admin/timetables
pub async fn create_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateSlotRequest>,
) -> Result<(StatusCode, Json<TimetableSlot>), ApiError> {
    let slot = state
        .services
        .timetables
        .create(&auth, req.into_new()?)
        .await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// PATCH /api/admin/timetables/{id}
pub async fn update_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateSlotRequest>,
) -> Result<Json<TimetableSlot>, ApiError> {
    let id = parse_uuid(&id)?;
    let slot = state
        .services
        .timetables
        .update(&auth, id, req.into())
        .await?;
    Ok(Json(slot))
}

/// DELETE /api/admin/timetables/{id}
pub async fn delete_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    state.services.timetables.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Timetable slot deleted")))
}

/// POST /api/admin/timetables/check
pub async fn check_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CheckSlotRequest>,
) -> Result<Json<ClashReport>, ApiError> {
    let (probe, ignore) = req.into_probe();
    let report = state
        .services
        .timetables
        .check(&auth, &probe, ignore)
        .await?;
    Ok(Json(report))
}
