//! # campusdesk-entity
//!
//! Domain entity models for CampusDesk. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! additionally derive `sqlx::FromRow`; wire names are camelCase to match
//! the dashboard client.

pub mod room;
pub mod session;
pub mod stats;
pub mod timetable;
pub mod user;
pub mod validate;
