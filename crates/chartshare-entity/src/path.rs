//! Rules for user-chosen public share paths.

use thiserror::Error;

/// Minimum length of a custom path.
pub const MIN_PATH_LEN: usize = 4;
/// Maximum length of a custom path.
pub const MAX_PATH_LEN: usize = 48;

/// Reasons a share path cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// Fewer than [`MIN_PATH_LEN`] characters.
    #[error("url must be at least 4 characters long")]
    TooShort,
    /// More than [`MAX_PATH_LEN`] characters.
    #[error("url must be at most 48 characters long")]
    TooLong,
    /// A character outside `[a-zA-Z0-9-]`.
    #[error("use a-z, A-Z, 0-9, '-' characters only")]
    InvalidChars,
    /// Another share already owns the path.
    #[error("url is not available")]
    Unavailable,
}

/// Checks a custom path against the length and charset rules.
///
/// No normalization is applied: `My-Year` and `my-year` are distinct paths.
pub fn validate_path(path: &str) -> Result<(), PathError> {
    let len = path.chars().count();
    if len < MIN_PATH_LEN {
        return Err(PathError::TooShort);
    }
    if len > MAX_PATH_LEN {
        return Err(PathError::TooLong);
    }
    if !path.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(PathError::InvalidChars);
    }
    Ok(())
}
