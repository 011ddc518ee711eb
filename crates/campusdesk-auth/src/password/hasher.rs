//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;

use campusdesk_core::error::AppError;

/// Plaintext behind the hash verified when a login names an unknown email.
const DUMMY_PASSWORD: &str = "campusdesk-timing-equalizer";

/// Hash of [`DUMMY_PASSWORD`], computed on first use.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        let argon2 = Argon2::default();
        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Runs a full verification against a throwaway hash and discards the
    /// result, so a login for an unknown email costs the same as a wrong
    /// password.
    pub fn verify_dummy(&self, password: &str) -> Result<(), AppError> {
        let hash = match DUMMY_HASH.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash_password(DUMMY_PASSWORD)?;
                DUMMY_HASH.get_or_init(|| hash)
            }
        };
        self.verify_password(password, hash).map(|_| ())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("Campus#Desk2024").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("Campus#Desk2024", &hash).unwrap());
        assert!(!hasher.verify_password("campus#desk2024", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("same-password").unwrap();
        let b = hasher.hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_dummy_succeeds_for_any_input() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_dummy("whatever").is_ok());
        assert!(hasher.verify_dummy("").is_ok());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("x", "not-a-phc-string").is_err());
    }
}
