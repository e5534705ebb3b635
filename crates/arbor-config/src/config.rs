//! Top-level configuration and loading

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::components::{BuildConfig, DistributedConfig, HashingConfig};
use crate::error::{ConfigError, ConfigResult};

/// Complete arbor configuration
///
/// Every section is optional in the file; omitted sections and fields take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    pub hashing: HashingConfig,
    pub build: BuildConfig,
    pub distributed: DistributedConfig,
}

impl ArborConfig {
    /// Load configuration from `path`, falling back to defaults
    ///
    /// A `None` path or a path that does not exist yields the defaults. The
    /// loaded configuration is validated before it is returned.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file without validating it
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check every value before any computation starts
    pub fn validate(&self) -> ConfigResult<()> {
        self.hashing.algorithm()?;

        let distributed = &self.distributed;
        if distributed.chunk_size == 0 {
            return Err(ConfigError::invalid("distributed.chunk_size", "must be at least 1"));
        }
        if distributed.work_unit_size == 0 {
            return Err(ConfigError::invalid(
                "distributed.work_unit_size",
                "must be at least 1",
            ));
        }
        if distributed.max_concurrency == 0 {
            return Err(ConfigError::invalid(
                "distributed.max_concurrency",
                "must be at least 1",
            ));
        }
        if let Some(url) = &distributed.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    "distributed.endpoint_url",
                    format!("expected an http(s) URL, got {url}"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BuildStrategyKind;
    use arbor_core::{BuildStrategy, HashAlgorithm};
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ArborConfig::default();
        assert_eq!(config.hashing.algorithm().unwrap(), HashAlgorithm::Sha256);
        assert_eq!(
            config.build.strategy(),
            BuildStrategy::Parallel { threshold: 1024 }
        );
        assert_eq!(config.distributed.chunk_size, 8);
        assert_eq!(config.distributed.work_unit_size, 16_384);
        assert_eq!(config.distributed.max_concurrency, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ArborConfig::load(Some(Path::new("/nonexistent/arbor.toml"))).unwrap();
        assert_eq!(config, ArborConfig::default());
        assert_eq!(ArborConfig::load(None).unwrap(), ArborConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let file = write_config(
            r#"
[hashing]
algorithm = "BLAKE3"

[build]
strategy = "recursive"
threshold = 64

[distributed]
max_concurrency = 16
"#,
        );
        let config = ArborConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.hashing.algorithm().unwrap(), HashAlgorithm::Blake3);
        assert_eq!(config.build.strategy, BuildStrategyKind::Recursive);
        assert_eq!(
            config.build.strategy(),
            BuildStrategy::Recursive { threshold: 64 }
        );
        assert_eq!(config.distributed.max_concurrency, 16);
        assert_eq!(config.distributed.chunk_size, 8);
    }

    #[test]
    fn test_standard_alias() {
        let config: ArborConfig = toml::from_str("[build]\nstrategy = \"standard\"\n").unwrap();
        assert_eq!(config.build.strategy(), BuildStrategy::Sequential);
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[distributed]\nchunk_size = \"eight\"\n");
        assert!(matches!(
            ArborConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = ArborConfig::default();
        config.distributed.max_concurrency = 0;
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::Invalid {
                field: "distributed.max_concurrency",
                reason: "must be at least 1".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let mut config = ArborConfig::default();
        config.distributed.chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = ArborConfig::default();
        config.distributed.work_unit_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut config = ArborConfig::default();
        config.distributed.endpoint_url = Some("ftp://worker".to_string());
        assert!(config.validate().is_err());

        config.distributed.endpoint_url = Some("https://worker.example/compute".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_algorithm_fails_load() {
        let file = write_config("[hashing]\nalgorithm = \"crc32\"\n");
        assert!(matches!(
            ArborConfig::load(Some(file.path())),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
