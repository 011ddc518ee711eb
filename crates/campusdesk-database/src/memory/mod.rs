//! Process-local store implementations.
//!
//! Rows live in [`dashmap::DashMap`]s so reads never block each other.
//! Writes that must check an invariant across rows (unique email or code,
//! timetable clashes) hold a per-store write mutex for the whole
//! check-then-insert.

pub mod room;
pub mod session;
pub mod timetable;
pub mod user;

pub use room::MemoryRoomStore;
pub use session::MemorySessionStore;
pub use timetable::MemoryTimetableStore;
pub use user::MemoryUserStore;
