//! Session issuing, validation, and revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{debug, info};

use chartshare_core::config::SessionConfig;
use chartshare_core::error::AppError;
use chartshare_core::result::AppResult;
use chartshare_database::SessionRepository;
use chartshare_entity::session::{SESSION_ID_LEN, Session, SessionToken};

/// Upper bound on the session lifetime, in days.
const MAX_TTL_DAYS: i64 = 3650;

/// Issues and checks session cookie tokens.
#[derive(Debug, Clone)]
pub struct SessionService {
    /// Session repository.
    session_repo: Arc<SessionRepository>,
    /// How long a session stays valid after creation.
    ttl: Duration,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(session_repo: Arc<SessionRepository>, config: &SessionConfig) -> Self {
        let max_ttl = Duration::days(MAX_TTL_DAYS);
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .map_or(max_ttl, |ttl| ttl.min(max_ttl));
        Self { session_repo, ttl }
    }

    /// Starts a session for `owner_id` and returns the cookie token.
    pub async fn new_session(&self, owner_id: u64) -> AppResult<String> {
        let mut session_id = [0u8; SESSION_ID_LEN];
        OsRng.fill_bytes(&mut session_id);

        let session = Session {
            owner_id,
            session_id,
            created_at: Utc::now(),
        };
        self.session_repo.insert(&session).await?;

        info!(owner_id, "Session created");
        Ok(session.token().encode())
    }

    /// Resolves a cookie token to the GitHub user ID it belongs to.
    pub async fn validate(&self, token: &str) -> AppResult<u64> {
        let token = SessionToken::decode(token).map_err(|e| {
            debug!(error = %e, "Malformed session cookie");
            AppError::authentication("Invalid session")
        })?;

        let session = self
            .session_repo
            .find(token.owner_id, &token.session_id)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid session"))?;

        if session.is_expired(self.ttl, Utc::now()) {
            self.session_repo
                .delete(session.owner_id, &session.session_id)
                .await?;
            debug!(owner_id = session.owner_id, "Expired session removed");
            return Err(AppError::authentication("Session expired"));
        }

        Ok(session.owner_id)
    }

    /// Ends the session behind a cookie token. Unknown sessions are ignored.
    pub async fn remove(&self, token: &str) -> AppResult<()> {
        let token = SessionToken::decode(token)
            .map_err(|e| AppError::validation(format!("Invalid session token: {e}")))?;

        if self
            .session_repo
            .delete(token.owner_id, &token.session_id)
            .await?
        {
            info!(owner_id = token.owner_id, "Session removed");
        }
        Ok(())
    }

    /// Deletes every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let purged = self
            .session_repo
            .delete_created_before(Utc::now() - self.ttl)
            .await?;
        if purged > 0 {
            info!(purged, "Expired sessions purged");
        }
        Ok(purged)
    }
}
