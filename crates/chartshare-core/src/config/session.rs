//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Login session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Name of the short-lived OAuth CSRF state cookie.
    #[serde(default = "default_state_cookie_name")]
    pub state_cookie_name: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Whether cookies carry the `Secure` attribute.
    #[serde(default = "default_true")]
    pub secure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            state_cookie_name: default_state_cookie_name(),
            ttl_seconds: default_ttl(),
            secure_cookies: true,
        }
    }
}

fn default_cookie_name() -> String {
    "__Host-session".to_string()
}

fn default_state_cookie_name() -> String {
    "__Host-oauth-state".to_string()
}

// One week.
fn default_ttl() -> u64 {
    7 * 24 * 3600
}

fn default_true() -> bool {
    true
}
