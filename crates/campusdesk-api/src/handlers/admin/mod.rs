//! Admin-area handlers. Every route here sits behind the admin-area gate.

pub mod rooms;
pub mod sessions;
pub mod stats;
pub mod timetables;
pub mod users;
