//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use campusdesk_core::config::{AuthConfig, MAX_TOKEN_TTL_HOURS};
use campusdesk_core::error::AppError;
use campusdesk_entity::user::User;

use super::claims::Claims;

/// Creates signed HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: chrono::Duration::hours(config.token_ttl_hours.min(MAX_TOKEN_TTL_HOURS) as i64),
        }
    }

    /// Issues a token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.issue_at(user, Utc::now())
    }

    /// Issues a token as if signed at `issued_at`.
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        let claims = Claims::for_user(user, issued_at, self.ttl);
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_entity::user::{CreateUser, UserRole};
    use chrono::Duration;

    fn user() -> User {
        User::from_create(CreateUser {
            email: "admin@campus.edu".to_string(),
            password_hash: "hash".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            department: None,
        })
    }

    #[test]
    fn test_expiry_follows_ttl() {
        let encoder = JwtEncoder::new(&AuthConfig::default());
        let now = Utc::now();
        let issued = encoder.issue_at(&user(), now).unwrap();
        assert_eq!(issued.expires_at.timestamp(), (now + Duration::hours(24)).timestamp());
    }

    #[test]
    fn test_oversized_ttl_is_clamped() {
        let config = AuthConfig {
            token_ttl_hours: u64::MAX,
            ..AuthConfig::default()
        };
        let encoder = JwtEncoder::new(&config);
        let now = Utc::now();
        let issued = encoder.issue_at(&user(), now).unwrap();
        assert_eq!(
            issued.expires_at.timestamp(),
            (now + Duration::hours(MAX_TOKEN_TTL_HOURS as i64)).timestamp()
        );
    }
}
