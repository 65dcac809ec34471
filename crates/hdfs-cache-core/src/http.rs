use crate::client::CacheAdmin;
use crate::error::{CoreError, CoreResult};
use crate::model::{CacheDirectiveInfo, CachePoolEntry, CachePoolInfo, FileEntry, PathPattern};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use url::Url;

const API_ROOT: &str = "cacheadmin/v1/";

#[derive(Debug, Deserialize)]
struct GlobResponse {
    #[serde(default)]
    entries: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct PoolsResponse {
    #[serde(default)]
    pools: Vec<CachePoolEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectiveResponse {
    id: u64,
}

/// [`CacheAdmin`] over the JSON cache-admin gateway at `fs.defaultFS`.
pub struct HttpCacheAdmin {
    base: Url,
    http: reqwest::Client,
    closed: AtomicBool,
}

impl HttpCacheAdmin {
    pub fn new(endpoint: &str) -> CoreResult<Self> {
        let mut base = Url::parse(endpoint)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "fs.defaultFS must be an http(s) cache-admin endpoint, got `{}`",
                endpoint
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let base = base.join(API_ROOT)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("hdfs-cache/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base,
            http,
            closed: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, resource: &str) -> CoreResult<Url> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CoreError::ClientClosed);
        }
        Ok(self.base.join(resource)?)
    }

    fn glob_url(&self, pattern: &PathPattern) -> CoreResult<Url> {
        let mut url = self.url("glob")?;
        url.query_pairs_mut().append_pair("pattern", pattern.as_str());
        Ok(url)
    }
}

async fn check(resp: Response) -> CoreResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(CoreError::Remote {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CacheAdmin for HttpCacheAdmin {
    async fn glob_status(&self, pattern: &PathPattern) -> CoreResult<Vec<FileEntry>> {
        let url = self.glob_url(pattern)?;
        debug!(%url, "glob");
        let resp = check(self.http.get(url).send().await?).await?;
        let body: GlobResponse = resp.json().await?;
        Ok(body.entries)
    }

    async fn list_cache_pools(&self) -> CoreResult<Vec<CachePoolEntry>> {
        let url = self.url("pools")?;
        let resp = check(self.http.get(url).send().await?).await?;
        let body: PoolsResponse = resp.json().await?;
        Ok(body.pools)
    }

    async fn add_cache_pool(&self, info: CachePoolInfo) -> CoreResult<()> {
        let url = self.url("pools")?;
        let resp = self.http.post(url).json(&info).send().await?;
        if resp.status() == StatusCode::CONFLICT {
            return Err(CoreError::PoolExists(info.pool_name));
        }
        check(resp).await?;
        Ok(())
    }

    async fn add_cache_directive(&self, directive: CacheDirectiveInfo) -> CoreResult<u64> {
        let url = self.url("directives")?;
        let resp = check(self.http.post(url).json(&directive).send().await?).await?;
        let body: DirectiveResponse = resp.json().await?;
        Ok(body.id)
    }

    async fn close(&self) -> CoreResult<()> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            debug!(base = %self.base, "cache admin client closed");
        }
        Ok(())
    }
}
