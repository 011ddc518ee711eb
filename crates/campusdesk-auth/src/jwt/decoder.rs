//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use campusdesk_core::config::AuthConfig;
use campusdesk_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Every failure (bad format, signature or expiry) is `Unauthorized`.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(reason = %e, "Bearer token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use campusdesk_core::ErrorKind;
    use campusdesk_entity::user::{CreateUser, User, UserRole};
    use chrono::{Duration, Utc};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn user() -> User {
        User::from_create(CreateUser {
            email: "hod@campus.edu".to_string(),
            password_hash: "unused".to_string(),
            name: "Head".to_string(),
            role: UserRole::Hod,
            department: Some("Physics".to_string()),
        })
    }

    #[test]
    fn test_round_trip_claims() {
        let cfg = config("secret-one");
        let user = user();
        let issued = JwtEncoder::new(&cfg).issue(&user).unwrap();
        let claims = JwtDecoder::new(&cfg).decode(&issued.token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Hod);
        assert_eq!(claims.dept.as_deref(), Some("Physics"));
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_token_older_than_ttl_is_rejected() {
        let cfg = config("secret-one");
        let issued = JwtEncoder::new(&cfg)
            .issue_at(&user(), Utc::now() - Duration::hours(24) - Duration::seconds(1))
            .unwrap();
        let err = JwtDecoder::new(&cfg).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = JwtEncoder::new(&config("secret-one")).issue(&user()).unwrap();
        let err = JwtDecoder::new(&config("secret-two"))
            .decode(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config("secret-one"))
            .decode("not.a.jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
