//! Persistence contract for shares.

use async_trait::async_trait;

use chartshare_core::result::AppResult;
use chartshare_database::ShareRepository;
use chartshare_entity::share::{NewShare, ShareRecord};

/// Storage backend used by [`ShareService`](super::ShareService).
///
/// Implementations must make `insert_if_path_free` atomic with respect to
/// path uniqueness; the per-owner quota is serialized by the service.
#[async_trait]
pub trait ShareStore: Send + Sync + 'static {
    /// Number of shares owned by `owner_id`.
    async fn count_by_owner(&self, owner_id: u64) -> AppResult<u64>;

    /// Insert `share` unless its path is taken. Returns whether it was inserted.
    async fn insert_if_path_free(&self, share: &NewShare) -> AppResult<bool>;

    /// Whether a share with this exact path exists.
    async fn path_exists(&self, path: &str) -> AppResult<bool>;

    /// Look up a share by path.
    async fn find_by_path(&self, path: &str) -> AppResult<Option<ShareRecord>>;

    /// All shares of an owner, oldest first.
    async fn find_by_owner(&self, owner_id: u64) -> AppResult<Vec<ShareRecord>>;

    /// Delete the share at `path` if `owner_id` owns it. Returns whether a row went away.
    async fn delete(&self, path: &str, owner_id: u64) -> AppResult<bool>;
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn count_by_owner(&self, owner_id: u64) -> AppResult<u64> {
        ShareRepository::count_by_owner(self, owner_id).await
    }

    async fn insert_if_path_free(&self, share: &NewShare) -> AppResult<bool> {
        ShareRepository::insert_if_path_free(self, share).await
    }

    async fn path_exists(&self, path: &str) -> AppResult<bool> {
        ShareRepository::path_exists(self, path).await
    }

    async fn find_by_path(&self, path: &str) -> AppResult<Option<ShareRecord>> {
        ShareRepository::find_by_path(self, path).await
    }

    async fn find_by_owner(&self, owner_id: u64) -> AppResult<Vec<ShareRecord>> {
        ShareRepository::find_by_owner(self, owner_id).await
    }

    async fn delete(&self, path: &str, owner_id: u64) -> AppResult<bool> {
        ShareRepository::delete(self, path, owner_id).await
    }
}
