//! Response DTOs.
//!
//! Lists and single rows are returned as the entity itself; only the
//! envelopes below wrap anything.

use serde::{Deserialize, Serialize};

use campusdesk_entity::user::UserProfile;

/// `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The signed-in user.
    pub user: UserProfile,
}

/// Acknowledgement for deletes and other body-less mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store backend health.
    pub database: String,
}
