//! Login and "who am I".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use campusdesk_auth::jwt::JwtEncoder;
use campusdesk_auth::password::PasswordHasher;
use campusdesk_core::error::AppError;
use campusdesk_database::UserStore;
use campusdesk_entity::user::UserProfile;

use crate::context::RequestContext;

/// Successful login payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Bearer token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: UserProfile,
}

/// Verifies credentials and issues bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT token encoder.
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    /// Authenticates by email and password.
    ///
    /// An unknown email and a wrong password fail identically with
    /// `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("email and password are required"));
        }

        let Some(user) = self.users.find_by_email(email).await? else {
            self.hasher.verify_dummy(password)?;
            warn!(email = %email, "Login failed: unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(email = %email, user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        let issued = self.encoder.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.profile(),
        })
    }

    /// Returns the caller's current profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<UserProfile, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .map(|u| u.profile())
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
