//! # campusdesk-core
//!
//! Core crate for CampusDesk. Contains the configuration schema and
//! loader, and the unified error system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other CampusDesk crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
