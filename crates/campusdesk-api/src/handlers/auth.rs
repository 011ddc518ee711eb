//! Auth handlers — login and me.

use axum::Json;
use axum::extract::State;

use campusdesk_service::LoginResult;

use crate::dto::request::LoginRequest;
use crate::dto::response::MeResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state.services.auth.login(&req.email, &req.password).await?;
    Ok(Json(result))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<MeResponse>, ApiError> {
    let user = state.services.auth.profile(&auth).await?;
    Ok(Json(MeResponse { user }))
}
