use crate::error::CoreResult;
use crate::model::{CacheDirectiveInfo, CachePoolEntry, CachePoolInfo, FileEntry, PathPattern};
use async_trait::async_trait;

/// Remote cache administration surface of the distributed filesystem.
///
/// Calls are awaited one at a time by the pipeline; implementations need not
/// support concurrent use beyond `Send + Sync`.
#[async_trait]
pub trait CacheAdmin: Send + Sync {
    /// Expands a glob into matching entries. No match is an empty list.
    async fn glob_status(&self, pattern: &PathPattern) -> CoreResult<Vec<FileEntry>>;

    async fn list_cache_pools(&self) -> CoreResult<Vec<CachePoolEntry>>;

    /// Fails with [`CoreError::PoolExists`](crate::CoreError::PoolExists)
    /// when a pool of that name is already registered.
    async fn add_cache_pool(&self, info: CachePoolInfo) -> CoreResult<()>;

    /// Returns the id assigned to the new directive.
    async fn add_cache_directive(&self, directive: CacheDirectiveInfo) -> CoreResult<u64>;

    /// Releases the handle. Safe to call more than once.
    async fn close(&self) -> CoreResult<()>;
}
