//! Role gate for the admin area.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use campusdesk_entity::user::UserRole;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Roles that may enter `/api/admin` at all. Finer checks happen per
/// operation against the permission table.
pub const ADMIN_AREA_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Hod];

/// Rejects unauthenticated callers with 401 and other roles with 403.
///
/// The verified context is stashed in the request extensions so handlers
/// do not decode the token a second time.
pub async fn admin_area(
    State(state): State<AppState>,
    auth: AuthUser,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state
        .services
        .rbac
        .require_role(auth.role, ADMIN_AREA_ROLES)?;
    request.extensions_mut().insert(auth.0);
    Ok(next.run(request).await)
}
