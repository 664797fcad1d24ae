//! Share allocation configuration.

use serde::{Deserialize, Serialize};

/// Limits applied by the share allocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Maximum number of live shares a single user may own.
    #[serde(default = "default_max_shares_per_user")]
    pub max_shares_per_user: u64,
    /// Base URL prepended to share paths in responses (e.g. `https://charts.example/s/`).
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            max_shares_per_user: default_max_shares_per_user(),
            public_base_url: None,
        }
    }
}

fn default_max_shares_per_user() -> u64 {
    64
}
