use crate::client::CacheAdmin;
use crate::error::CoreResult;
use crate::model::{FileEntry, PathPattern};
use tracing::debug;

/// Expands each pattern in order and concatenates the matches.
///
/// One glob call per pattern. Entries are neither filtered nor de-duplicated,
/// so overlapping patterns yield the same path twice.
pub async fn resolve_paths<C>(client: &C, patterns: &[PathPattern]) -> CoreResult<Vec<FileEntry>>
where
    C: CacheAdmin + ?Sized,
{
    let mut resolved = Vec::new();
    for pattern in patterns {
        let entries = client.glob_status(pattern).await?;
        debug!(pattern = %pattern, matches = entries.len(), "pattern expanded");
        resolved.extend(entries);
    }
    Ok(resolved)
}
