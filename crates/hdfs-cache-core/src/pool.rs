use crate::client::CacheAdmin;
use crate::error::{CoreError, CoreResult};
use crate::model::CachePoolInfo;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStatus {
    Existing,
    Created,
}

/// Makes sure `pool_name` exists, creating it with default settings if not.
/// Surrounding whitespace in the name is ignored.
///
/// Listing and creating are separate calls, so another client may create the
/// pool in between. A create rejected as already existing is accepted as
/// success and is not retried.
pub async fn ensure_pool<C>(client: &C, pool_name: &str) -> CoreResult<PoolStatus>
where
    C: CacheAdmin + ?Sized,
{
    let pool_name = pool_name.trim();
    if pool_name.is_empty() {
        return Err(CoreError::Usage("poolName is required".to_string()));
    }

    let pools = client.list_cache_pools().await?;
    if pools.iter().any(|entry| entry.pool_name == pool_name) {
        info!(pool = pool_name, "cache pool exists");
        return Ok(PoolStatus::Existing);
    }

    match client.add_cache_pool(CachePoolInfo::new(pool_name)).await {
        Ok(()) => {
            info!(pool = pool_name, "cache pool created");
            Ok(PoolStatus::Created)
        }
        Err(CoreError::PoolExists(_)) => {
            warn!(pool = pool_name, "cache pool was created concurrently");
            Ok(PoolStatus::Existing)
        }
        Err(err) => Err(err),
    }
}
