use crate::error::{CoreError, CoreResult};
use crate::model::{Expiration, PathPattern};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const PATH_KEY: &str = "path";
pub const POOL_NAME_KEY: &str = "poolName";
pub const TTL_KEY: &str = "ttl";
pub const VERBOSE_KEY: &str = "verbose";
pub const DEFAULT_FS_KEY: &str = "fs.defaultFS";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9870";
pub const DEFAULT_TTL_MS: i64 = -1;

/// Environment variables and the keys they populate.
pub const ENV_KEYS: [(&str, &str); 5] = [
    ("HDFS_CACHE_PATH", PATH_KEY),
    ("HDFS_CACHE_POOL_NAME", POOL_NAME_KEY),
    ("HDFS_CACHE_TTL", TTL_KEY),
    ("HDFS_CACHE_VERBOSE", VERBOSE_KEY),
    ("HDFS_CACHE_FS", DEFAULT_FS_KEY),
];

/// Flat key/value configuration. Later merges override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Loads a flat JSON object. Arrays of strings are joined with commas so
    /// `"path": ["/a/*", "/b/*"]` behaves like `-Dpath=/a/*,/b/*`.
    /// Unreadable or malformed files are reported as [`CoreError::Config`].
    pub fn merge_json_file(&mut self, path: &Path) -> CoreResult<()> {
        let data = fs::read_to_string(path)
            .map_err(|err| CoreError::Config(format!("{}: {}", path.display(), err)))?;
        self.merge_json_str(&data).map_err(|err| match err {
            CoreError::Config(msg) => CoreError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn merge_json_str(&mut self, data: &str) -> CoreResult<()> {
        let object: serde_json::Map<String, Value> = serde_json::from_str(data)
            .map_err(|err| CoreError::Config(format!("invalid JSON: {}", err)))?;
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        other => Err(CoreError::Config(format!(
                            "{}: expected string items, found {}",
                            key, other
                        ))),
                    })
                    .collect::<CoreResult<Vec<_>>>()?
                    .join(","),
                Value::Null => continue,
                Value::Object(_) => {
                    return Err(CoreError::Config(format!("{}: nested objects are not supported", key)))
                }
            };
            self.set(key, text);
        }
        Ok(())
    }

    /// Applies the known `HDFS_CACHE_*` variables from `vars`.
    pub fn merge_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            if let Some((_, key)) = ENV_KEYS.iter().find(|(env, _)| *env == name.as_ref()) {
                self.set(*key, value);
            }
        }
    }

    /// Applies `key=value` definitions as given to `-D`.
    pub fn merge_definitions<S: AsRef<str>>(&mut self, definitions: &[S]) -> CoreResult<()> {
        for def in definitions {
            let def = def.as_ref();
            let (key, value) = def.split_once('=').ok_or_else(|| {
                CoreError::Config(format!("expected key=value, got `{}`", def))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CoreError::Config(format!("missing key in `{}`", def)));
            }
            self.set(key, value);
        }
        Ok(())
    }

    pub fn get_trimmed(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn get_i64(&self, key: &str, default: i64) -> CoreResult<i64> {
        match self.get_trimmed(key) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| CoreError::Config(format!("{} must be an integer, got `{}`", key, raw))),
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> CoreResult<bool> {
        match self.get_trimmed(key) {
            None => Ok(default),
            Some(raw) if raw.eq_ignore_ascii_case("true") => Ok(true),
            Some(raw) if raw.eq_ignore_ascii_case("false") => Ok(false),
            Some(raw) => Err(CoreError::Config(format!(
                "{} must be true or false, got `{}`",
                key, raw
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheToolConfig {
    pub patterns: Vec<PathPattern>,
    pub pool_name: String,
    pub ttl_ms: i64,
    pub verbose: bool,
    pub endpoint: String,
}

impl CacheToolConfig {
    /// Reads and validates the tool settings. Missing `path` or `poolName`
    /// is reported as [`CoreError::Usage`].
    pub fn from_properties(props: &Properties) -> CoreResult<Self> {
        let cfg = Self {
            patterns: props
                .get(PATH_KEY)
                .map(PathPattern::parse_list)
                .unwrap_or_default(),
            pool_name: props.get_trimmed(POOL_NAME_KEY).unwrap_or_default().to_string(),
            ttl_ms: props.get_i64(TTL_KEY, DEFAULT_TTL_MS)?,
            verbose: props.get_bool(VERBOSE_KEY, false)?,
            endpoint: props
                .get_trimmed(DEFAULT_FS_KEY)
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.patterns.is_empty() {
            return Err(CoreError::Usage(format!("{} is required", PATH_KEY)));
        }
        if self.pool_name.trim().is_empty() {
            return Err(CoreError::Usage(format!("{} is required", POOL_NAME_KEY)));
        }
        Ok(())
    }

    pub fn expiration(&self) -> Expiration {
        Expiration::from_ttl_ms(self.ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(defs: &[&str]) -> Properties {
        let mut p = Properties::new();
        p.merge_definitions(defs).unwrap();
        p
    }

    #[test]
    fn defaults_apply_when_optional_keys_absent() {
        let cfg = CacheToolConfig::from_properties(&props(&["path=/tmp/folder/*", "poolName=test"])).unwrap();
        assert_eq!(cfg.ttl_ms, -1);
        assert!(!cfg.verbose);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.expiration(), Expiration::Never);
    }

    #[test]
    fn parses_every_key() {
        let cfg = CacheToolConfig::from_properties(&props(&[
            "path=/tmp/folder/*, /user/hive/*/2/*",
            "poolName= prod ",
            "ttl=100",
            "verbose=TRUE",
            "fs.defaultFS=http://namenode:9870",
        ]))
        .unwrap();
        assert_eq!(cfg.patterns.len(), 2);
        assert_eq!(cfg.patterns[1].as_str(), "/user/hive/*/2/*");
        assert_eq!(cfg.pool_name, "prod");
        assert_eq!(cfg.expiration(), Expiration::Relative(100));
        assert!(cfg.verbose);
        assert_eq!(cfg.endpoint, "http://namenode:9870");
    }

    #[test]
    fn missing_path_is_usage_error() {
        let err = CacheToolConfig::from_properties(&props(&["poolName=test"])).unwrap_err();
        assert!(matches!(err, CoreError::Usage(ref m) if m.contains("path")));

        let err = CacheToolConfig::from_properties(&props(&["path= , ", "poolName=test"])).unwrap_err();
        assert!(matches!(err, CoreError::Usage(_)));
    }

    #[test]
    fn missing_pool_name_is_usage_error() {
        let err = CacheToolConfig::from_properties(&props(&["path=/a/*"])).unwrap_err();
        assert!(matches!(err, CoreError::Usage(ref m) if m.contains("poolName")));

        let err = CacheToolConfig::from_properties(&props(&["path=/a/*", "poolName=  "])).unwrap_err();
        assert!(matches!(err, CoreError::Usage(_)));
    }

    #[test]
    fn malformed_values_are_config_errors() {
        let err = CacheToolConfig::from_properties(&props(&["path=/a/*", "poolName=p", "ttl=soon"])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let err = CacheToolConfig::from_properties(&props(&["path=/a/*", "poolName=p", "verbose=yes"])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let mut p = Properties::new();
        assert!(matches!(p.merge_definitions(&["path"]), Err(CoreError::Config(_))));
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let mut p = Properties::new();
        p.merge_json_str(r#"{"path": ["/a/*", "/b/*"], "poolName": "file", "ttl": 5, "verbose": true}"#)
            .unwrap();
        p.merge_env(vec![
            ("HDFS_CACHE_POOL_NAME", "env"),
            ("UNRELATED", "ignored"),
        ]);
        p.merge_definitions(&["ttl=7"]).unwrap();

        assert_eq!(p.get(PATH_KEY), Some("/a/*,/b/*"));
        assert_eq!(p.get(POOL_NAME_KEY), Some("env"));
        assert_eq!(p.get(TTL_KEY), Some("7"));
        assert_eq!(p.get(VERBOSE_KEY), Some("true"));
        assert_eq!(p.get("UNRELATED"), None);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let mut p = Properties::new();
        let err = p.merge_json_str(r#"{path: "/a/*"}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(ref m) if m.starts_with("invalid JSON")));
        assert!(err.is_usage());
    }

    #[test]
    fn json_rejects_nested_objects() {
        let mut p = Properties::new();
        let err = p.merge_json_str(r#"{"path": {"a": 1}}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
