//! Timetable slot entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use campusdesk_core::error::AppError;

use super::time::TimeOfDay;
use super::weekday::Weekday;
use crate::validate;

/// A recurring weekly booking of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    /// Unique slot identifier.
    pub id: Uuid,
    /// Course name or code.
    pub course: String,
    /// Teacher running the course.
    pub teacher: String,
    /// Free-text room label the clash scan compares on.
    pub room: String,
    /// Day of the week.
    pub day: Weekday,
    /// Inclusive start.
    pub start_time: TimeOfDay,
    /// Exclusive end.
    pub end_time: TimeOfDay,
    /// When the slot was created.
    pub created_at: DateTime<Utc>,
    /// When the slot was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TimetableSlot {
    /// Build a fresh row from validated creation data.
    pub fn from_new(data: NewSlot) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            course: data.course,
            teacher: data.teacher,
            room: data.room,
            day: data.day,
            start_time: data.start_time,
            end_time: data.end_time,
            created_at: now,
            updated_at: now,
        }
    }
}

fn check_window(start: TimeOfDay, end: TimeOfDay) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::validation(format!(
            "startTime ({start}) must be before endTime ({end})"
        )));
    }
    Ok(())
}

/// Validated data for a new slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlot {
    pub course: String,
    pub teacher: String,
    pub room: String,
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl NewSlot {
    /// Validate raw input: text fields non-blank, `start < end`.
    pub fn new(
        course: &str,
        teacher: &str,
        room: &str,
        day: Weekday,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<Self, AppError> {
        check_window(start_time, end_time)?;
        Ok(Self {
            course: validate::required("course", course)?,
            teacher: validate::required("teacher", teacher)?,
            room: validate::required("room", room)?,
            day,
            start_time,
            end_time,
        })
    }
}

/// Partial update of a slot.
#[derive(Debug, Clone, Default)]
pub struct SlotPatch {
    pub course: Option<String>,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub day: Option<Weekday>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
}

impl SlotPatch {
    /// Validate the patch against the merged window and apply it to `slot`.
    ///
    /// `slot` is left untouched on error.
    pub fn apply(self, slot: &mut TimetableSlot) -> Result<(), AppError> {
        let course = validate::optional("course", self.course.as_deref())?;
        let teacher = validate::optional("teacher", self.teacher.as_deref())?;
        let room = validate::optional("room", self.room.as_deref())?;
        let start_time = self.start_time.unwrap_or(slot.start_time);
        let end_time = self.end_time.unwrap_or(slot.end_time);
        check_window(start_time, end_time)?;

        if let Some(course) = course {
            slot.course = course;
        }
        if let Some(teacher) = teacher {
            slot.teacher = teacher;
        }
        if let Some(room) = room {
            slot.room = room;
        }
        if let Some(day) = self.day {
            slot.day = day;
        }
        slot.start_time = start_time;
        slot.end_time = end_time;
        slot.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_slot_requires_ordered_window() {
        assert!(NewSlot::new("CS101", "Dr. Rao", "R1", Weekday::Monday, t("10:00"), t("10:00")).is_err());
        assert!(NewSlot::new("CS101", "Dr. Rao", "R1", Weekday::Monday, t("11:00"), t("10:00")).is_err());
        assert!(NewSlot::new("CS101", "Dr. Rao", "R1", Weekday::Monday, t("09:00"), t("10:00")).is_ok());
    }

    #[test]
    fn test_patch_checks_merged_window() {
        let mut slot = TimetableSlot::from_new(
            NewSlot::new("CS101", "Dr. Rao", "R1", Weekday::Monday, t("09:00"), t("10:00")).unwrap(),
        );
        let bad = SlotPatch {
            start_time: Some(t("10:30")),
            ..SlotPatch::default()
        };
        assert!(bad.apply(&mut slot).is_err());
        assert_eq!(slot.start_time, t("09:00"));

        let good = SlotPatch {
            end_time: Some(t("11:00")),
            day: Some(Weekday::Tuesday),
            ..SlotPatch::default()
        };
        good.apply(&mut slot).unwrap();
        assert_eq!(slot.end_time, t("11:00"));
        assert_eq!(slot.day, Weekday::Tuesday);
    }

    #[test]
    fn test_wire_format() {
        let slot = TimetableSlot::from_new(
            NewSlot::new("CS101", "Dr. Rao", "R1", Weekday::Monday, t("09:00"), t("10:00")).unwrap(),
        );
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["day"], "Monday");
    }
}
