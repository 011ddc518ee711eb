//! Room availability status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a room can currently be booked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "room_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// Free for use.
    #[default]
    Available,
    /// Occupied right now.
    InUse,
    /// Out of service.
    Maintenance,
}

impl RoomStatus {
    /// Return the status as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::InUse => "IN_USE",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = campusdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "IN_USE" => Ok(Self::InUse),
            "MAINTENANCE" => Ok(Self::Maintenance),
            _ => Err(campusdesk_core::AppError::validation(format!(
                "Invalid room status: '{s}'. Expected one of: AVAILABLE, IN_USE, MAINTENANCE"
            ))),
        }
    }
}
