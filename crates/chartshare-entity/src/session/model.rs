//! Session entity model.

use chrono::{DateTime, Duration, Utc};

use super::token::{SESSION_ID_LEN, SessionToken};

/// A login session bound to a GitHub user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// GitHub user ID.
    pub owner_id: u64,
    /// Random session identifier.
    pub session_id: [u8; SESSION_ID_LEN],
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Returns the cookie token identifying this session.
    pub fn token(&self) -> SessionToken {
        SessionToken {
            owner_id: self.owner_id,
            session_id: self.session_id,
        }
    }

    /// Whether the session is older than `ttl` at `now`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.created_at + ttl <= now
    }
}
