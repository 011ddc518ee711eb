//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campusdesk_auth::jwt::Claims;
use campusdesk_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from verified token claims by the HTTP layer and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Email from the token.
    pub email: String,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Department from the token.
    pub department: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, role: UserRole, department: Option<String>) -> Self {
        Self {
            user_id,
            email,
            role,
            department,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for RequestContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims.sub, claims.email, claims.role, claims.dept)
    }
}
