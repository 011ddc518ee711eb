//! Store traits the services depend on.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`] and
//! a process-local one in [`crate::memory`]. Row identifiers and timestamps
//! are assigned by the caller, so both implementations persist exactly the
//! row they are handed.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use campusdesk_core::error::AppError;
use campusdesk_core::result::AppResult;
use campusdesk_entity::room::Room;
use campusdesk_entity::session::LiveSession;
use campusdesk_entity::timetable::{TimetableSlot, Weekday};
use campusdesk_entity::user::{User, UserRole};

/// Persistence for staff accounts.
#[async_trait]
pub trait UserStore: Send + Sync + Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users ordered by name.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a new user. A duplicate email is a `Conflict`.
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Overwrite the profile fields of an existing user. The password hash
    /// is never touched here.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Replace a user's password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Delete a user. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Total number of users.
    async fn count(&self) -> AppResult<i64>;

    /// Number of users holding any of `roles`.
    async fn count_by_roles(&self, roles: &[UserRole]) -> AppResult<i64>;
}

/// Persistence for rooms.
#[async_trait]
pub trait RoomStore: Send + Sync + Debug + 'static {
    /// Find a room by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>>;

    /// All rooms ordered by name.
    async fn list(&self) -> AppResult<Vec<Room>>;

    /// Insert a new room. A duplicate code is a `Conflict`.
    async fn create(&self, room: &Room) -> AppResult<Room>;

    /// Overwrite an existing room.
    async fn update(&self, room: &Room) -> AppResult<Room>;

    /// Delete a room. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Total number of rooms.
    async fn count(&self) -> AppResult<i64>;
}

/// Persistence for weekly timetable slots.
///
/// Writes go through the `*_checked` methods, which re-run the clash scan
/// and persist atomically with respect to other writers on the same day and
/// room.
#[async_trait]
pub trait TimetableStore: Send + Sync + Debug + 'static {
    /// Find a slot by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimetableSlot>>;

    /// All slots ordered by day then start time.
    async fn list(&self) -> AppResult<Vec<TimetableSlot>>;

    /// Slots on one day, ordered by start time.
    async fn list_by_day(&self, day: Weekday) -> AppResult<Vec<TimetableSlot>>;

    /// Insert a slot unless it clashes (`ScheduleConflict`).
    async fn create_checked(&self, slot: &TimetableSlot) -> AppResult<TimetableSlot>;

    /// Overwrite a slot unless its new window clashes with another slot.
    async fn update_checked(&self, slot: &TimetableSlot) -> AppResult<TimetableSlot>;

    /// Delete a slot. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Number of slots on `day`.
    async fn count_by_day(&self, day: Weekday) -> AppResult<i64>;
}

/// Persistence for live teaching sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + Debug + 'static {
    /// Find a session by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LiveSession>>;

    /// All sessions, newest first.
    async fn list(&self) -> AppResult<Vec<LiveSession>>;

    /// `LIVE` sessions, newest first.
    async fn list_active(&self) -> AppResult<Vec<LiveSession>>;

    /// Insert a new session.
    async fn create(&self, session: &LiveSession) -> AppResult<LiveSession>;

    /// Overwrite course, room and teacher. Status and `ended_at` are never
    /// written here.
    async fn update(&self, session: &LiveSession) -> AppResult<LiveSession>;

    /// Mark a `LIVE` session ended now. Returns `None` when no live row
    /// matched, so two racing ends cannot both succeed.
    async fn end(&self, id: Uuid) -> AppResult<Option<LiveSession>>;

    /// Delete a session. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Number of `LIVE` sessions.
    async fn count_active(&self) -> AppResult<i64>;
}

/// The error returned when a slot would double-book a room.
pub fn clash_error(existing: &TimetableSlot) -> AppError {
    AppError::schedule_conflict(format!(
        "Room '{}' is already booked on {} {}-{} for {}",
        existing.room, existing.day, existing.start_time, existing.end_time, existing.course
    ))
}

pub(crate) fn missing(entity: &str, id: Uuid) -> AppError {
    AppError::not_found(format!("{entity} {id} not found"))
}
