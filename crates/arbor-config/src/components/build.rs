//! Local tree building

use arbor_core::{BuildStrategy, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Strategy name as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStrategyKind {
    #[serde(alias = "standard")]
    Sequential,
    #[default]
    Parallel,
    Recursive,
}

/// Build section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub strategy: BuildStrategyKind,
    /// Split threshold (parallel) or group size (recursive)
    pub threshold: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strategy: BuildStrategyKind::default(),
            threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl BuildConfig {
    pub fn strategy(&self) -> BuildStrategy {
        match self.strategy {
            BuildStrategyKind::Sequential => BuildStrategy::Sequential,
            BuildStrategyKind::Parallel => BuildStrategy::Parallel {
                threshold: self.threshold,
            },
            BuildStrategyKind::Recursive => BuildStrategy::Recursive {
                threshold: self.threshold,
            },
        }
    }
}
