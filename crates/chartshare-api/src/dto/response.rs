//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `POST /api/validate-path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatePathResponse {
    /// Whether the path can be used right now.
    pub avail: bool,
    /// Why the path cannot be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Response of `POST /api/create-share`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareResponse {
    /// Public path of the new share.
    pub path: String,
    /// Full public URL, when a base URL is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Response of `GET /api/share/{path}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareInfoResponse {
    /// Canonical chart token.
    pub chart: String,
    /// GitHub user ID of the owner.
    pub github_user_id: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// One entry of `GET /api/shares`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSummary {
    /// Public path.
    pub path: String,
    /// Canonical chart token.
    pub chart: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /api/user-info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// GitHub user ID of the signed-in user.
    pub github_user_id: u64,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
}
