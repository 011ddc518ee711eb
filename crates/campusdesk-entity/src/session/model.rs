//! Live session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use campusdesk_core::error::AppError;

use super::status::SessionStatus;
use crate::validate;

/// A class currently (or previously) running in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// Course being taught.
    pub course: String,
    /// Room label.
    pub room: String,
    /// Teacher running the class.
    pub teacher: String,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session ended, if it has.
    pub ended_at: Option<DateTime<Utc>>,
}

impl LiveSession {
    /// Start a new session now.
    pub fn start(data: NewSession) -> Self {
        Self {
            id: Uuid::new_v4(),
            course: data.course,
            room: data.room,
            teacher: data.teacher,
            status: SessionStatus::Live,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Whether the session is still running.
    pub fn is_live(&self) -> bool {
        self.status == SessionStatus::Live
    }

    /// Transition `Live -> Ended`. Ending twice is a conflict.
    pub fn end(&mut self) -> Result<(), AppError> {
        if !self.is_live() {
            return Err(already_ended(self.id));
        }
        self.status = SessionStatus::Ended;
        self.ended_at = Some(Utc::now());
        Ok(())
    }
}

/// The error returned when ending a session that is no longer live.
pub fn already_ended(id: Uuid) -> AppError {
    AppError::conflict(format!("Session {id} has already ended"))
}

/// Validated data for a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub course: String,
    pub room: String,
    pub teacher: String,
}

impl NewSession {
    /// Validate raw input.
    pub fn new(course: &str, room: &str, teacher: &str) -> Result<Self, AppError> {
        Ok(Self {
            course: validate::required("course", course)?,
            room: validate::required("room", room)?,
            teacher: validate::required("teacher", teacher)?,
        })
    }
}

/// Partial update of a session's descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub course: Option<String>,
    pub room: Option<String>,
    pub teacher: Option<String>,
}

impl SessionPatch {
    /// Validate the patch and merge it into `session`.
    pub fn apply(self, session: &mut LiveSession) -> Result<(), AppError> {
        let course = validate::optional("course", self.course.as_deref())?;
        let room = validate::optional("room", self.room.as_deref())?;
        let teacher = validate::optional("teacher", self.teacher.as_deref())?;
        if let Some(course) = course {
            session.course = course;
        }
        if let Some(room) = room {
            session.room = room;
        }
        if let Some(teacher) = teacher {
            session.teacher = teacher;
        }
        Ok(())
    }
}
