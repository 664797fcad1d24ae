//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chartshare_core::config::AppConfig;
use chartshare_core::result::AppResult;
use chartshare_database::{DatabasePool, SessionRepository, ShareRepository};
use chartshare_service::{LinkService, SessionService, ShareService, ShareStore};

use crate::oauth::GithubClient;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Share allocator
    pub share_service: Arc<ShareService>,
    /// Session issuing and validation
    pub session_service: Arc<SessionService>,
    /// GitHub OAuth client
    pub github: Arc<GithubClient>,
}

impl AppState {
    /// Wires services on top of the database pool.
    pub fn new(config: AppConfig, db: DatabasePool) -> AppResult<Self> {
        let share_repo: Arc<dyn ShareStore> = Arc::new(ShareRepository::new(db.pool().clone()));
        Self::with_share_store(config, db, share_repo)
    }

    /// Like [`AppState::new`], but shares go to the given store.
    pub fn with_share_store(
        config: AppConfig,
        db: DatabasePool,
        share_store: Arc<dyn ShareStore>,
    ) -> AppResult<Self> {
        let session_repo = Arc::new(SessionRepository::new(db.pool().clone()));

        let share_service = Arc::new(ShareService::new(
            share_store,
            Arc::new(LinkService::new()),
            &config.shares,
        ));
        let session_service = Arc::new(SessionService::new(session_repo, &config.session));
        let github = Arc::new(GithubClient::new(&config.github)?);

        Ok(Self {
            config: Arc::new(config),
            db,
            share_service,
            session_service,
            github,
        })
    }
}
