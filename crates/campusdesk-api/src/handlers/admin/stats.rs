//! Dashboard statistics handler.

use axum::Json;
use axum::extract::State;

use campusdesk_entity::stats::OverviewStats;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/stats/overview
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<OverviewStats>, ApiError> {
    Ok(Json(state.services.stats.overview(&auth).await?))
}
