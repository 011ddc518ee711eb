//! Request DTOs with validation.
//!
//! Field names are camelCase to match the dashboard client. Each DTO
//! converts into the validated entity type the services take.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use campusdesk_core::error::AppError;
use campusdesk_entity::room::{NewRoom, RoomPatch, RoomStatus, coerce_capacity};
use campusdesk_entity::session::{NewSession, SessionPatch};
use campusdesk_entity::timetable::{ClashProbe, NewSlot, SlotPatch, TimeOfDay, Weekday};
use campusdesk_entity::user::{UpdateUser, UserRole};
use campusdesk_service::NewUserInput;

/// Runs the derived validator and folds any failures into one `Validation` error.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string().replace('\n', "; ")))?;
    Ok(req)
}

fn parse_opt<T>(value: Option<String>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = AppError>,
{
    value.as_deref().map(str::parse).transpose()
}

/// Login request body. Missing fields read as blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    /// Name.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    /// Role (ADMIN, HOD, FACULTY, STAFF).
    pub role: String,
    /// Department.
    pub department: Option<String>,
}

impl CreateUserRequest {
    /// Validate and convert into service input.
    pub fn into_input(self) -> Result<NewUserInput, AppError> {
        let req = validated(self)?;
        Ok(NewUserInput {
            role: req.role.parse()?,
            email: req.email,
            password: req.password,
            name: req.name,
            department: req.department,
        })
    }
}

/// Update user request (admin). Passwords go through the reset endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub active: Option<bool>,
    /// Only present to be refused.
    pub password: Option<Value>,
}

impl UpdateUserRequest {
    /// Convert into a profile patch.
    pub fn into_patch(self) -> Result<UpdateUser, AppError> {
        if self.password.is_some() {
            return Err(AppError::validation(
                "Passwords cannot be changed here; use PUT /api/admin/users/{id}/password",
            ));
        }
        let patch = UpdateUser {
            role: parse_opt::<UserRole>(self.role)?,
            name: self.name,
            email: self.email,
            department: self.department,
            active: self.active,
        };
        if patch.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        Ok(patch)
    }
}

/// Admin password reset.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ResetPasswordRequest {
    /// New password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Create room request. Capacity may be a number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateRoomRequest {
    pub name: String,
    pub code: String,
    pub capacity: Option<Value>,
    pub status: Option<String>,
}

impl CreateRoomRequest {
    /// Validate into a new room.
    pub fn into_new(self) -> Result<NewRoom, AppError> {
        let status = parse_opt::<RoomStatus>(self.status)?;
        NewRoom::new(&self.name, &self.code, self.capacity.as_ref(), status)
    }
}

/// Partial room update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub capacity: Option<Value>,
    pub status: Option<String>,
}

impl UpdateRoomRequest {
    /// Convert into a room patch.
    pub fn into_patch(self) -> Result<RoomPatch, AppError> {
        Ok(RoomPatch {
            status: parse_opt::<RoomStatus>(self.status)?,
            capacity: self.capacity.map(|v| coerce_capacity(Some(&v))),
            name: self.name,
            code: self.code,
        })
    }
}

/// Create timetable slot request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    pub course: String,
    pub teacher: String,
    pub room: String,
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl CreateSlotRequest {
    /// Validate into a new slot.
    pub fn into_new(self) -> Result<NewSlot, AppError> {
        NewSlot::new(
            &self.course,
            &self.teacher,
            &self.room,
            self.day,
            self.start_time,
            self.end_time,
        )
    }
}

/// Partial slot update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    pub course: Option<String>,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub day: Option<Weekday>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
}

impl From<UpdateSlotRequest> for SlotPatch {
    fn from(req: UpdateSlotRequest) -> Self {
        Self {
            course: req.course,
            teacher: req.teacher,
            room: req.room,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

/// Read-only clash pre-check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSlotRequest {
    pub day: Weekday,
    pub room: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Slot being edited, excluded from the scan.
    pub ignore_id: Option<Uuid>,
}

impl CheckSlotRequest {
    /// Split into the probe and the id to ignore.
    pub fn into_probe(self) -> (ClashProbe, Option<Uuid>) {
        let probe = ClashProbe {
            day: self.day,
            room: self.room,
            start_time: self.start_time,
            end_time: self.end_time,
        };
        (probe, self.ignore_id)
    }
}

/// `?day=` filter for the timetable list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimetableQuery {
    pub day: Option<String>,
}

impl TimetableQuery {
    /// Parsed day filter; an empty value means no filter.
    pub fn day(&self) -> Result<Option<Weekday>, AppError> {
        match self.day.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(day) => day.parse().map(Some),
        }
    }
}

/// Start a live session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StartSessionRequest {
    pub course: String,
    pub room: String,
    pub teacher: String,
}

impl StartSessionRequest {
    /// Validate into a new session.
    pub fn into_new(self) -> Result<NewSession, AppError> {
        NewSession::new(&self.course, &self.room, &self.teacher)
    }
}

/// Edit a session's descriptive fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSessionRequest {
    pub course: Option<String>,
    pub room: Option<String>,
    pub teacher: Option<String>,
}

impl From<UpdateSessionRequest> for SessionPatch {
    fn from(req: UpdateSessionRequest) -> Self {
        Self {
            course: req.course,
            room: req.room,
            teacher: req.teacher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_update_user_refuses_password() {
        let req: UpdateUserRequest =
            serde_json::from_value(json!({ "name": "X", "password": "hunter22" })).unwrap();
        assert_eq!(req.into_patch().unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "email": "not-an-email",
            "password": "x",
            "name": "A",
            "role": "STAFF"
        }))
        .unwrap();
        assert!(req.into_input().is_err());
    }

    #[test]
    fn test_room_capacity_string_is_coerced() {
        let req: CreateRoomRequest =
            serde_json::from_value(json!({ "name": "Lab 1", "code": "L1", "capacity": "abc" }))
                .unwrap();
        assert_eq!(req.into_new().unwrap().capacity, 0);
    }

    #[test]
    fn test_slot_request_parses_wire_values() {
        let req: CreateSlotRequest = serde_json::from_value(json!({
            "course": "CS101",
            "teacher": "Dr. Rao",
            "room": "R1",
            "day": "Monday",
            "startTime": "09:00",
            "endTime": "10:00"
        }))
        .unwrap();
        let slot = req.into_new().unwrap();
        assert_eq!(slot.day, Weekday::Monday);
        assert_eq!(slot.start_time, TimeOfDay::hm(9, 0).unwrap());
    }

    #[test]
    fn test_empty_day_query_means_all() {
        let query = TimetableQuery { day: Some(String::new()) };
        assert_eq!(query.day().unwrap(), None);
        let query = TimetableQuery { day: Some("tue".into()) };
        assert_eq!(query.day().unwrap(), Some(Weekday::Tuesday));
    }
}
