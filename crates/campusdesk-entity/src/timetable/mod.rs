//! Weekly timetable entities and the room clash scan.

pub mod clash;
pub mod model;
pub mod time;
pub mod weekday;

pub use clash::{ClashProbe, find_clash, overlaps, same_room};
pub use model::{NewSlot, SlotPatch, TimetableSlot};
pub use time::TimeOfDay;
pub use weekday::Weekday;
