//! # campusdesk-service
//!
//! Business logic service layer for CampusDesk. Each service checks the
//! caller's permission, validates input and orchestrates the stores.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. [`ServiceContext`] wires the
//! whole graph from configuration.

pub mod auth;
pub mod context;
pub mod room;
pub mod services;
pub mod session;
pub mod stats;
pub mod timetable;
pub mod user;

pub use auth::{AuthService, LoginResult};
pub use context::RequestContext;
pub use room::RoomService;
pub use services::ServiceContext;
pub use session::SessionService;
pub use stats::StatsService;
pub use timetable::{ClashReport, TimetableService};
pub use user::{AdminUserService, NewUserInput};
