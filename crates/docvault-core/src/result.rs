//! Convenience result type alias for docvault.

use crate::error::AppError;

/// A specialized `Result` type for docvault operations.
pub type AppResult<T> = Result<T, AppError>;
