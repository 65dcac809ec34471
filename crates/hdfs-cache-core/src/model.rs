use serde::{Deserialize, Serialize};
use std::fmt;

/// A glob expression expanded by the remote filesystem, e.g. `/user/hive/*/2/*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathPattern(String);

impl PathPattern {
    /// Trims the input; blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Splits a comma-separated list, keeping order and dropping blank items.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::parse).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A concrete path returned by glob expansion, with its status metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub path: String,
    #[serde(default)]
    pub is_directory: bool,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub modification_time: i64,
}

impl FileEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
            length: 0,
            modification_time: 0,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            is_directory: true,
            ..Self::file(path)
        }
    }
}

/// Settings for a pool to be created. Only the name is set by this tool;
/// the remaining fields are left to the service defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePoolInfo {
    pub pool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_relative_expiry_ms: Option<u64>,
}

impl CachePoolInfo {
    pub fn new(pool_name: impl Into<String>) -> Self {
        Self {
            pool_name: pool_name.into(),
            owner: None,
            group: None,
            mode: None,
            limit: None,
            max_relative_expiry_ms: None,
        }
    }
}

/// A pool as listed by the remote service.
pub type CachePoolEntry = CachePoolInfo;

/// When a directive stops applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expiration {
    #[serde(rename = "never")]
    Never,
    /// Milliseconds from the moment the directive is submitted.
    #[serde(rename = "relativeMs")]
    Relative(u64),
}

impl Expiration {
    /// Any non-positive TTL, including the unset default of -1, never expires.
    pub fn from_ttl_ms(ttl_ms: i64) -> Self {
        if ttl_ms > 0 {
            Expiration::Relative(ttl_ms as u64)
        } else {
            Expiration::Never
        }
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiration::Never => f.write_str("never"),
            Expiration::Relative(ms) => write!(f, "{} ms", ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDirectiveInfo {
    pub path: String,
    pub pool: String,
    pub expiration: Expiration,
}

impl CacheDirectiveInfo {
    pub fn new(path: impl Into<String>, pool: impl Into<String>, expiration: Expiration) -> Self {
        Self {
            path: path.into(),
            pool: pool.into(),
            expiration,
        }
    }
}
