//! GitHub OAuth application configuration.

use serde::{Deserialize, Serialize};

/// Credentials and endpoints of the GitHub OAuth application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// OAuth client ID.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default, skip_serializing)]
    pub client_secret: String,
    /// Authorization endpoint users are redirected to.
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    /// Token exchange endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Authenticated user endpoint.
    #[serde(default = "default_user_url")]
    pub user_url: String,
    /// HTTP timeout for GitHub calls in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
            user_url: default_user_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_authorize_url() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_user_url() -> String {
    "https://api.github.com/user".to_string()
}

fn default_timeout() -> u64 {
    10
}
