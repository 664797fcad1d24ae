//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use chartshare_core::error::{AppError, ErrorKind};
use chartshare_core::result::AppResult;
use chartshare_entity::session::{SESSION_ID_LEN, Session};

use super::{from_db_id, to_db_id};

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    owner_id: i64,
    session_id: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for Session {
    type Error = AppError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let session_id: [u8; SESSION_ID_LEN] = row
            .session_id
            .try_into()
            .map_err(|_| AppError::database("Stored session id has invalid length"))?;
        Ok(Self {
            owner_id: from_db_id(row.owner_id),
            session_id,
            created_at: row.created_at,
        })
    }
}

/// Repository for login session persistence.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new session.
    pub async fn insert(&self, session: &Session) -> AppResult<()> {
        sqlx::query("INSERT INTO sessions (owner_id, session_id, created_at) VALUES (?, ?, ?)")
            .bind(to_db_id(session.owner_id))
            .bind(session.session_id.as_slice())
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;
        Ok(())
    }

    /// Find a session by owner and session ID.
    pub async fn find(
        &self,
        owner_id: u64,
        session_id: &[u8; SESSION_ID_LEN],
    ) -> AppResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT owner_id, session_id, created_at FROM sessions \
             WHERE owner_id = ? AND session_id = ?",
        )
        .bind(to_db_id(owner_id))
        .bind(session_id.as_slice())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))?;

        row.map(Session::try_from).transpose()
    }

    /// Delete a session. Returns `false` when it did not exist.
    pub async fn delete(&self, owner_id: u64, session_id: &[u8; SESSION_ID_LEN]) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE owner_id = ? AND session_id = ?")
            .bind(to_db_id(owner_id))
            .bind(session_id.as_slice())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session created before `cutoff`.
    pub async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge expired sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
