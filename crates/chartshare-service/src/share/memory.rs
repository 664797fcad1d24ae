//! In-memory share store for tests and ephemeral runs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use chartshare_core::result::AppResult;
use chartshare_entity::share::{NewShare, ShareRecord};

use super::store::ShareStore;

/// Share store keeping every record in process memory.
///
/// Records are kept in insertion order. Suitable for single-node, non-durable
/// deployments only.
#[derive(Debug, Default)]
pub struct MemoryShareStore {
    shares: RwLock<Vec<ShareRecord>>,
}

impl MemoryShareStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored shares.
    pub async fn len(&self) -> usize {
        self.shares.read().await.len()
    }

    /// Whether the store holds no shares.
    pub async fn is_empty(&self) -> bool {
        self.shares.read().await.is_empty()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn count_by_owner(&self, owner_id: u64) -> AppResult<u64> {
        let shares = self.shares.read().await;
        Ok(shares.iter().filter(|s| s.owner_id == owner_id).count() as u64)
    }

    async fn insert_if_path_free(&self, share: &NewShare) -> AppResult<bool> {
        let mut shares = self.shares.write().await;
        if shares.iter().any(|s| s.path == share.path) {
            return Ok(false);
        }
        shares.push(ShareRecord {
            owner_id: share.owner_id,
            path: share.path.clone(),
            chart: share.chart.to_bytes().to_vec(),
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn path_exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.shares.read().await.iter().any(|s| s.path == path))
    }

    async fn find_by_path(&self, path: &str) -> AppResult<Option<ShareRecord>> {
        let shares = self.shares.read().await;
        Ok(shares.iter().find(|s| s.path == path).cloned())
    }

    async fn find_by_owner(&self, owner_id: u64) -> AppResult<Vec<ShareRecord>> {
        let shares = self.shares.read().await;
        Ok(shares
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, path: &str, owner_id: u64) -> AppResult<bool> {
        let mut shares = self.shares.write().await;
        let before = shares.len();
        shares.retain(|s| !(s.path == path && s.owner_id == owner_id));
        Ok(shares.len() < before)
    }
}
