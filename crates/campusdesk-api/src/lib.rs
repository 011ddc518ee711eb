//! # campusdesk-api
//!
//! HTTP API layer for CampusDesk built on Axum.
//!
//! Provides the REST endpoints consumed by the admin dashboard, the
//! `AuthUser` extractor, the admin-area role gate, request logging, CORS,
//! DTOs, and the mapping from [`AppError`](campusdesk_core::AppError) to
//! HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
