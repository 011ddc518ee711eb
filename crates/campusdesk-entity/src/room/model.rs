//! Room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use campusdesk_core::error::AppError;

use super::status::RoomStatus;
use crate::validate;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// Display name ("Lab 1").
    pub name: String,
    /// Short unique code ("L1").
    pub code: String,
    /// Seats; never negative.
    pub capacity: i32,
    /// Current availability.
    pub status: RoomStatus,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Build a fresh row from validated creation data.
    pub fn from_new(data: NewRoom) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            code: data.code,
            capacity: data.capacity,
            status: data.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated data for a new room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    /// Display name.
    pub name: String,
    /// Unique code.
    pub code: String,
    /// Seats.
    pub capacity: i32,
    /// Initial status.
    pub status: RoomStatus,
}

impl NewRoom {
    /// Validate raw input. Capacity is coerced, see [`coerce_capacity`].
    pub fn new(
        name: &str,
        code: &str,
        capacity: Option<&Value>,
        status: Option<RoomStatus>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            name: validate::required("name", name)?,
            code: validate::required("code", code)?,
            capacity: coerce_capacity(capacity),
            status: status.unwrap_or_default(),
        })
    }
}

/// Partial update of a room.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New capacity (already coerced).
    pub capacity: Option<i32>,
    /// New status.
    pub status: Option<RoomStatus>,
}

impl RoomPatch {
    /// Validate the patch and merge it into `room`.
    pub fn apply(self, room: &mut Room) -> Result<(), AppError> {
        let name = validate::optional("name", self.name.as_deref())?;
        let code = validate::optional("code", self.code.as_deref())?;

        if let Some(name) = name {
            room.name = name;
        }
        if let Some(code) = code {
            room.code = code;
        }
        if let Some(capacity) = self.capacity {
            room.capacity = capacity.max(0);
        }
        if let Some(status) = self.status {
            room.status = status;
        }
        room.updated_at = Utc::now();
        Ok(())
    }
}

/// Coerce a loosely typed capacity into a non-negative integer.
///
/// Numbers and numeric strings are truncated to an integer; anything else,
/// including an absent value, becomes 0. Negative values clamp to 0.
pub fn coerce_capacity(value: Option<&Value>) -> i32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    };
    parsed.unwrap_or(0).clamp(0, i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_capacity() {
        assert_eq!(coerce_capacity(Some(&json!(30))), 30);
        assert_eq!(coerce_capacity(Some(&json!("45"))), 45);
        assert_eq!(coerce_capacity(Some(&json!(" 12.9 "))), 12);
        assert_eq!(coerce_capacity(Some(&json!("abc"))), 0);
        assert_eq!(coerce_capacity(Some(&json!(null))), 0);
        assert_eq!(coerce_capacity(Some(&json!(-4))), 0);
        assert_eq!(coerce_capacity(None), 0);
    }

    #[test]
    fn test_new_room_defaults_status() {
        let room = NewRoom::new("Lab 1", "L1", Some(&json!(30)), None).unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.capacity, 30);
    }

    #[test]
    fn test_new_room_requires_code() {
        assert!(NewRoom::new("Lab 1", " ", None, None).is_err());
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let mut room = Room::from_new(NewRoom::new("Lab 1", "L1", Some(&json!(30)), None).unwrap());
        RoomPatch {
            status: Some(RoomStatus::Maintenance),
            ..RoomPatch::default()
        }
        .apply(&mut room)
        .unwrap();
        assert_eq!(room.status, RoomStatus::Maintenance);
        assert_eq!(room.capacity, 30);
        assert_eq!(room.code, "L1");
    }
}
