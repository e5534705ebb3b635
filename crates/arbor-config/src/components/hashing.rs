//! Digest algorithm selection

use arbor_core::HashAlgorithm;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Hashing section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Algorithm name, e.g. `"sha256"` or `"blake3"` (case-insensitive)
    pub algorithm: String,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default().as_str().to_string(),
        }
    }
}

impl HashingConfig {
    /// Resolve the configured algorithm
    pub fn algorithm(&self) -> ConfigResult<HashAlgorithm> {
        self.algorithm.parse().map_err(|e: arbor_core::MerkleError| {
            ConfigError::invalid("hashing.algorithm", e.to_string())
        })
    }
}
