//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/validate-path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatePathRequest {
    /// Candidate custom path.
    pub path: String,
}

/// Body of `POST /api/create-share`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// Custom path; a random one is generated when absent.
    #[serde(default)]
    pub custom_path: Option<String>,
    /// Canonical chart token.
    pub chart: String,
}

/// Body of `POST /api/remove-share`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveShareRequest {
    /// Path of the share to remove.
    pub path: String,
}

/// Query parameters GitHub appends to the OAuth callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthCallbackParams {
    /// Authorization code.
    pub code: Option<String>,
    /// CSRF state echoed back.
    pub state: Option<String>,
    /// Set when the user denied access.
    pub error: Option<String>,
}
