//! Convenience result type alias for Chartshare.

use crate::error::AppError;

/// A specialized `Result` type for Chartshare operations.
pub type AppResult<T> = Result<T, AppError>;
