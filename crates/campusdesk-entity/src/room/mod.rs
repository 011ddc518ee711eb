//! Room domain entities.

pub mod model;
pub mod status;

pub use model::{NewRoom, Room, RoomPatch, coerce_capacity};
pub use status::RoomStatus;
