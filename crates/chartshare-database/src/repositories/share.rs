//! Share repository implementation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use chartshare_core::error::{AppError, ErrorKind};
use chartshare_core::result::AppResult;
use chartshare_entity::share::{NewShare, ShareRecord};

use super::{from_db_id, to_db_id};

#[derive(Debug, sqlx::FromRow)]
struct ShareRow {
    owner_id: i64,
    path: String,
    chart: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl From<ShareRow> for ShareRecord {
    fn from(row: ShareRow) -> Self {
        Self {
            owner_id: from_db_id(row.owner_id),
            path: row.path,
            chart: row.chart,
            created_at: row.created_at,
        }
    }
}

/// Repository for share persistence and lookup.
///
/// Path uniqueness is enforced by the `shares_unique_path` index; the
/// per-owner quota is enforced one level up, by the share service.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: SqlitePool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count the shares owned by a user.
    pub async fn count_by_owner(&self, owner_id: u64) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shares WHERE owner_id = ?")
            .bind(to_db_id(owner_id))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count shares", e))?;
        Ok(count as u64)
    }

    /// Insert a share unless its path is already taken.
    ///
    /// Returns `false` when the path belongs to another share.
    pub async fn insert_if_path_free(&self, share: &NewShare) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO shares (owner_id, path, chart, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(to_db_id(share.owner_id))
        .bind(&share.path)
        .bind(share.chart.to_bytes().to_vec())
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to insert share",
                e,
            )),
        }
    }

    /// Whether any share uses the given path.
    pub async fn path_exists(&self, path: &str) -> AppResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shares WHERE path = ?)")
            .bind(path)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up path", e))?;
        Ok(found != 0)
    }

    /// Find a share by its public path.
    pub async fn find_by_path(&self, path: &str) -> AppResult<Option<ShareRecord>> {
        sqlx::query_as::<_, ShareRow>(
            "SELECT owner_id, path, chart, created_at FROM shares WHERE path = ?",
        )
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(ShareRecord::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// List the shares owned by a user, oldest first.
    pub async fn find_by_owner(&self, owner_id: u64) -> AppResult<Vec<ShareRecord>> {
        let rows = sqlx::query_as::<_, ShareRow>(
            "SELECT owner_id, path, chart, created_at FROM shares \
             WHERE owner_id = ? ORDER BY created_at, rowid",
        )
        .bind(to_db_id(owner_id))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))?;

        Ok(rows.into_iter().map(ShareRecord::from).collect())
    }

    /// Delete a share, but only when it belongs to `owner_id`.
    ///
    /// Returns `false` when no such share exists for that owner.
    pub async fn delete(&self, path: &str, owner_id: u64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shares WHERE path = ? AND owner_id = ?")
            .bind(path)
            .bind(to_db_id(owner_id))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }
}
