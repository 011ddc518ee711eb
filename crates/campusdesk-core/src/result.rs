//! Convenience result type alias for CampusDesk.

use crate::error::AppError;

/// A specialized `Result` type for CampusDesk operations.
pub type AppResult<T> = Result<T, AppError>;
