//! Live teaching session entities.

pub mod model;
pub mod status;

pub use model::{LiveSession, NewSession, SessionPatch, already_ended};
pub use status::SessionStatus;
