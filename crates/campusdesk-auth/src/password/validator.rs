//! Password policy enforcement for new passwords.

use campusdesk_core::config::AuthConfig;
use campusdesk_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Minimum zxcvbn score; 0 skips the entropy check.
    min_score: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: config.password_min_score.min(4),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// `hints` are user-specific words (email, name) that zxcvbn penalizes.
    pub fn validate(&self, password: &str, hints: &[&str]) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("password is required"));
        }

        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if self.min_score > 0 {
            let estimate = zxcvbn::zxcvbn(password, hints);
            if score_value(estimate.score()) < self.min_score {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }
}

fn score_value(score: zxcvbn::Score) -> u8 {
    match score {
        zxcvbn::Score::Zero => 0,
        zxcvbn::Score::One => 1,
        zxcvbn::Score::Two => 2,
        zxcvbn::Score::Three => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(min_score: u8) -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            password_min_score: min_score,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(validator(0).validate("short", &[]).is_err());
        assert!(validator(0).validate("longenough", &[]).is_ok());
    }

    #[test]
    fn test_rejects_common_password() {
        assert!(validator(2).validate("password", &[]).is_err());
        assert!(validator(2).validate("Violet-Harbor-93-Lantern", &[]).is_ok());
    }

    #[test]
    fn test_rejects_blank_password() {
        assert!(validator(0).validate("        ", &[]).is_err());
    }
}
