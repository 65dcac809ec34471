use clap::Parser;
use hdfs_cache_core::config::DEFAULT_FS_KEY;
use hdfs_cache_core::{CacheToolConfig, CoreResult, Properties};
use std::path::PathBuf;

pub const USAGE: &str = "\
hdfs-cache -Dpath=<globPath; supports csv format> -DpoolName=<poolName> -Dttl=<ttl_in_ms (0 or less means NEVER)> -Dverbose=true/false(false by default) [--fs <url>] [--conf <file.json>]
path, poolName are mandatory parameters
e.g: hdfs-cache -Dpath=/tmp/folder/*,/user/hive/*/2/* -DpoolName=test -Dverbose=true
e.g: hdfs-cache -Dpath=/tmp/folder/* -DpoolName=test -Dverbose=true
e.g: hdfs-cache -Dpath=/tmp/folder/* -DpoolName=test -Dttl=-1
e.g: hdfs-cache -Dpath=/tmp/folder/* -DpoolName=test -Dttl=100
e.g: hdfs-cache --fs http://namenode:9870 -Dpath=/tmp/folder/* -DpoolName=test";

#[derive(Debug, Parser)]
#[command(
    name = "hdfs-cache",
    version,
    about = "Register cache directives for every path matching the given globs"
)]
pub struct Cli {
    /// Configuration property, e.g. -Dpath=/tmp/folder/* (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub define: Vec<String>,

    /// JSON file with configuration properties; -D and HDFS_CACHE_* override it
    #[arg(long = "conf", value_name = "FILE")]
    pub conf: Option<PathBuf>,

    /// Cache admin endpoint, same as -Dfs.defaultFS=<URL>
    #[arg(long = "fs", value_name = "URL")]
    pub fs: Option<String>,
}

impl Cli {
    /// Merges config file, environment, then command line, in rising precedence.
    pub fn properties<I>(&self, env: I) -> CoreResult<Properties>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut props = Properties::new();
        if let Some(path) = &self.conf {
            props.merge_json_file(path)?;
        }
        props.merge_env(env);
        if let Some(fs) = &self.fs {
            props.set(DEFAULT_FS_KEY, fs.as_str());
        }
        props.merge_definitions(self.define.as_slice())?;
        Ok(props)
    }

    pub fn load_config(&self) -> CoreResult<CacheToolConfig> {
        let props = self.properties(std::env::vars())?;
        CacheToolConfig::from_properties(&props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdfs_cache_core::{CoreError, Expiration};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hdfs-cache").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn hadoop_style_definitions() {
        let cli = parse(&[
            "-Dpath=/tmp/folder/*,/user/hive/*/2/*",
            "-DpoolName=test",
            "-Dttl=100",
            "-Dverbose=true",
        ]);
        let props = cli.properties(std::iter::empty()).unwrap();
        let cfg = CacheToolConfig::from_properties(&props).unwrap();
        assert_eq!(cfg.patterns.len(), 2);
        assert_eq!(cfg.pool_name, "test");
        assert_eq!(cfg.expiration(), Expiration::Relative(100));
        assert!(cfg.verbose);
    }

    #[test]
    fn separated_definition_and_fs_flag() {
        let cli = parse(&["-D", "path=/data/*", "-D", "poolName=prod", "--fs", "http://nn:9870"]);
        let props = cli.properties(std::iter::empty()).unwrap();
        let cfg = CacheToolConfig::from_properties(&props).unwrap();
        assert_eq!(cfg.endpoint, "http://nn:9870");
        assert_eq!(cfg.patterns[0].as_str(), "/data/*");
    }

    #[test]
    fn definitions_override_environment() {
        let cli = parse(&["-DpoolName=cli"]);
        let env = vec![
            ("HDFS_CACHE_PATH".to_string(), "/env/*".to_string()),
            ("HDFS_CACHE_POOL_NAME".to_string(), "env".to_string()),
        ];
        let cfg = CacheToolConfig::from_properties(&cli.properties(env).unwrap()).unwrap();
        assert_eq!(cfg.pool_name, "cli");
        assert_eq!(cfg.patterns[0].as_str(), "/env/*");
    }

    #[test]
    fn missing_mandatory_keys_are_usage_errors() {
        let cli = parse(&["-DpoolName=test"]);
        let err = CacheToolConfig::from_properties(&cli.properties(std::iter::empty()).unwrap()).unwrap_err();
        assert!(err.is_usage());

        let cli = parse(&["-Dpath=/tmp/*"]);
        let err = CacheToolConfig::from_properties(&cli.properties(std::iter::empty()).unwrap()).unwrap_err();
        assert!(matches!(err, CoreError::Usage(_)));
    }

    #[test]
    fn missing_conf_file_is_config_error() {
        let cli = parse(&["--conf", "/nonexistent/hdfs-cache.json"]);
        let err = cli.properties(std::iter::empty()).unwrap_err();
        assert!(matches!(err, CoreError::Config(ref m) if m.starts_with("/nonexistent/hdfs-cache.json")));
        assert!(err.is_usage());
    }

    #[test]
    fn malformed_conf_file_is_config_error() {
        let path = std::env::temp_dir().join(format!("hdfs-cache-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{1: \"not json\"}").unwrap();
        let cli = parse(&["--conf", path.to_str().unwrap(), "-Dpath=/a", "-DpoolName=p"]);

        let result = cli.properties(std::iter::empty());
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(err.is_usage());
    }
}
