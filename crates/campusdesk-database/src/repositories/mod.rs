//! PostgreSQL implementations of the store traits.

pub mod room;
pub mod session;
pub mod timetable;
pub mod user;

pub use room::RoomRepository;
pub use session::SessionRepository;
pub use timetable::TimetableRepository;
pub use user::UserRepository;
