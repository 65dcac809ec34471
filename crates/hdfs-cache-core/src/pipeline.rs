use std::io::{self, Write};
use std::time::Instant;

use crate::client::CacheAdmin;
use crate::config::CacheToolConfig;
use crate::error::{log_error, CoreResult};
use crate::http::HttpCacheAdmin;
use crate::pool::ensure_pool;
use crate::resolve::resolve_paths;
use crate::submit::submit_directives;
use crate::summary::RunSummary;
use tracing::info;

/// Resolves, reconciles the pool, then submits one directive per match.
/// Verbose `Cached : <path>` lines go to stdout.
pub async fn run<C>(config: &CacheToolConfig, client: &C) -> CoreResult<RunSummary>
where
    C: CacheAdmin + ?Sized,
{
    run_with_output(config, client, &mut io::stdout()).await
}

/// [`run`] writing verbose lines to `out`.
///
/// The clock starts right before resolution and stops after the last
/// directive. The first remote error ends the run.
pub async fn run_with_output<C, W>(config: &CacheToolConfig, client: &C, out: &mut W) -> CoreResult<RunSummary>
where
    C: CacheAdmin + ?Sized,
    W: Write + ?Sized,
{
    config.validate()?;
    let pool_name = config.pool_name.trim();

    let start = Instant::now();
    let entries = resolve_paths(client, &config.patterns).await?;
    info!(patterns = config.patterns.len(), matches = entries.len(), "paths resolved");

    let pool = ensure_pool(client, pool_name).await?;

    let expiration = config.expiration();
    let cached = submit_directives(client, &entries, pool_name, expiration, config.verbose, out).await?;
    let elapsed = start.elapsed();

    info!(
        cached,
        pool = pool_name,
        %expiration,
        elapsed_ms = elapsed.as_millis() as u64,
        "caching finished"
    );
    Ok(RunSummary { cached, elapsed, pool })
}

/// [`run`], then closes `client` whatever the outcome. A failed close is
/// logged and never replaces the run result.
pub async fn run_scoped<C>(config: &CacheToolConfig, client: &C) -> CoreResult<RunSummary>
where
    C: CacheAdmin + ?Sized,
{
    let result = run(config, client).await;
    if let Err(err) = client.close().await {
        log_error("closing cache admin client", &err);
    }
    result
}

/// Connects to `config.endpoint` over HTTP and performs a scoped run.
pub async fn run_remote(config: &CacheToolConfig) -> CoreResult<RunSummary> {
    config.validate()?;
    let client = HttpCacheAdmin::new(&config.endpoint)?;
    run_scoped(config, &client).await
}
