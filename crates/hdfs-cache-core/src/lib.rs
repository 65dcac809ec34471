pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod pool;
pub mod resolve;
pub mod submit;
pub mod summary;

pub use client::CacheAdmin;
pub use config::{CacheToolConfig, Properties};
pub use error::{CoreError, CoreResult};
pub use http::HttpCacheAdmin;
pub use model::{CacheDirectiveInfo, CachePoolEntry, CachePoolInfo, Expiration, FileEntry, PathPattern};
pub use pipeline::{run, run_remote, run_scoped, run_with_output};
pub use pool::{ensure_pool, PoolStatus};
pub use submit::submit_directives;
pub use summary::RunSummary;
