//! The share allocator.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use chartshare_core::config::ShareConfig;
use chartshare_entity::chart;
use chartshare_entity::path::{PathError, validate_path};
use chartshare_entity::share::{NewShare, Share};

use super::error::ShareError;
use super::link::LinkService;
use super::store::ShareStore;

/// Request to publish a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// GitHub user ID of the caller.
    pub owner_id: u64,
    /// Canonical chart token.
    pub chart: String,
    /// Path chosen by the caller; a random one is generated when absent.
    pub custom_path: Option<String>,
}

/// Creates, looks up, and removes shares.
///
/// Every owner may hold at most `max_shares_per_user` shares. The count and
/// the insert run under one process-wide lock, so concurrent creates by the
/// same owner can never overshoot the quota. Path uniqueness is left to the
/// store.
pub struct ShareService {
    /// Share persistence.
    store: Arc<dyn ShareStore>,
    /// Random path generator.
    link_service: Arc<LinkService>,
    /// Per-owner share limit.
    max_shares_per_user: u64,
    /// Serializes quota check and insert.
    quota_lock: Mutex<()>,
}

impl fmt::Debug for ShareService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareService")
            .field("max_shares_per_user", &self.max_shares_per_user)
            .finish_non_exhaustive()
    }
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        store: Arc<dyn ShareStore>,
        link_service: Arc<LinkService>,
        config: &ShareConfig,
    ) -> Self {
        Self {
            store,
            link_service,
            max_shares_per_user: config.max_shares_per_user,
            quota_lock: Mutex::new(()),
        }
    }

    /// The configured per-owner share limit.
    pub fn max_shares_per_user(&self) -> u64 {
        self.max_shares_per_user
    }

    /// Publishes a chart and returns its public path.
    pub async fn create_share(&self, req: CreateShareRequest) -> Result<String, ShareError> {
        let path = match req.custom_path {
            Some(path) => {
                validate_path(&path).inspect_err(|reason| {
                    debug!(owner_id = req.owner_id, path = %path, %reason, "Rejected custom path");
                })?;
                path
            }
            None => self.link_service.generate_path(),
        };

        let chart = chart::decode(&req.chart).inspect_err(|reason| {
            debug!(owner_id = req.owner_id, %reason, "Rejected chart token");
        })?;

        let share = NewShare {
            owner_id: req.owner_id,
            path,
            chart,
        };

        let inserted = {
            let _guard = self.quota_lock.lock().await;

            let owned = self.store.count_by_owner(share.owner_id).await?;
            if owned >= self.max_shares_per_user {
                warn!(
                    owner_id = share.owner_id,
                    owned,
                    max = self.max_shares_per_user,
                    "Share quota exceeded"
                );
                return Err(ShareError::QuotaExceeded);
            }

            self.store.insert_if_path_free(&share).await?
        };

        if !inserted {
            debug!(owner_id = share.owner_id, path = %share.path, "Path already taken");
            return Err(PathError::Unavailable.into());
        }

        info!(
            owner_id = share.owner_id,
            path = %share.path,
            year = share.chart.year(),
            "Share created"
        );
        Ok(share.path)
    }

    /// Whether `path` is valid and currently unused.
    ///
    /// The answer is advisory: a later [`create_share`](Self::create_share)
    /// can still lose the path to a concurrent caller.
    pub async fn is_path_avail(&self, path: &str) -> Result<bool, ShareError> {
        validate_path(path)?;
        Ok(!self.store.path_exists(path).await?)
    }

    /// Removes the share at `path` if `owner_id` owns it.
    ///
    /// Missing paths and paths owned by someone else are silently ignored.
    pub async fn remove_share(&self, path: &str, owner_id: u64) -> Result<(), ShareError> {
        if self.store.delete(path, owner_id).await? {
            info!(owner_id, path = %path, "Share removed");
        }
        Ok(())
    }

    /// Looks up a share by its public path.
    pub async fn get_share(&self, path: &str) -> Result<Share, ShareError> {
        let record = self
            .store
            .find_by_path(path)
            .await?
            .ok_or(ShareError::NotFound)?;
        Ok(record.into_share()?)
    }

    /// All shares owned by `owner_id`, oldest first.
    pub async fn get_all_user_shares(&self, owner_id: u64) -> Result<Vec<Share>, ShareError> {
        let records = self.store.find_by_owner(owner_id).await?;
        records
            .into_iter()
            .map(|record| record.into_share().map_err(ShareError::from))
            .collect()
    }
}
