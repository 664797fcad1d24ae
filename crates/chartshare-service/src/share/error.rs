//! Errors returned by share operations.

use thiserror::Error;

use chartshare_core::error::{AppError, ErrorKind};
use chartshare_entity::{ChartError, PathError};

/// Failure of a share operation.
///
/// Caller faults carry their own variant; anything the storage backend
/// reports is wrapped in [`ShareError::Storage`].
#[derive(Debug, Error)]
pub enum ShareError {
    /// The requested path is invalid or taken.
    #[error("{0}")]
    Path(#[from] PathError),
    /// The chart token does not decode.
    #[error("{0}")]
    Chart(#[from] ChartError),
    /// The owner already has the maximum number of shares.
    #[error("share limit reached, remove an existing share first")]
    QuotaExceeded,
    /// No share exists at the path.
    #[error("share not found")]
    NotFound,
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl ShareError {
    /// Short machine-readable category, sent to clients as `error_type`.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Chart(_) => "chart",
            Self::QuotaExceeded => "quota",
            Self::NotFound => "not_found",
            Self::Storage(_) => "storage",
        }
    }

    /// Whether the error was caused by the request rather than the server.
    pub fn is_caller_fault(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::Path(PathError::Unavailable) => {
                AppError::new(ErrorKind::Conflict, PathError::Unavailable.to_string())
            }
            ShareError::Path(reason) => AppError::validation(reason.to_string()),
            ShareError::Chart(reason) => AppError::validation(reason.to_string()),
            ShareError::QuotaExceeded => AppError::quota_exceeded(err.to_string()),
            ShareError::NotFound => AppError::not_found(err.to_string()),
            ShareError::Storage(inner) => inner,
        }
    }
}
