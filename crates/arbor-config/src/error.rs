//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file exists but could not be read
    #[error("IO error reading {}: {error}", .path.display())]
    Io { path: PathBuf, error: String },

    /// The configuration file is not valid TOML for [`crate::ArborConfig`]
    #[error("Parse error in {}: {error}", .path.display())]
    Parse { path: PathBuf, error: String },

    /// A value is out of range or unrecognised
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
