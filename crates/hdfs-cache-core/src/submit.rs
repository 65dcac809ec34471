use crate::client::CacheAdmin;
use crate::error::CoreResult;
use crate::model::{CacheDirectiveInfo, Expiration, FileEntry};
use std::io::Write;
use tracing::debug;

/// Submits one directive per entry, in order, stopping at the first failure.
///
/// Directives accepted before a failure stay registered. With `verbose` set,
/// each accepted path is written to `out` as `Cached : <path>`. Returns the
/// number submitted.
pub async fn submit_directives<C, W>(
    client: &C,
    entries: &[FileEntry],
    pool_name: &str,
    expiration: Expiration,
    verbose: bool,
    out: &mut W,
) -> CoreResult<usize>
where
    C: CacheAdmin + ?Sized,
    W: Write + ?Sized,
{
    for entry in entries {
        let directive = CacheDirectiveInfo::new(entry.path.clone(), pool_name, expiration);
        let id = client.add_cache_directive(directive).await?;
        debug!(id, path = %entry.path, pool = pool_name, %expiration, "directive added");
        if verbose {
            writeln!(out, "Cached : {}", entry.path)?;
        }
    }
    Ok(entries.len())
}
