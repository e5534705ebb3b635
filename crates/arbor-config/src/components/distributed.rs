//! Distributed run configuration
//!
//! Defaults mirror the constants the orchestrator has always shipped with:
//! 8-byte chunks, 16384 chunks per work unit and at most 300 requests in
//! flight.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 8;
pub const DEFAULT_WORK_UNIT_SIZE: usize = 16_384;
pub const DEFAULT_MAX_CONCURRENCY: usize = 300;

/// Distributed section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributedConfig {
    /// Worker endpoint receiving POSTed work requests
    pub endpoint_url: Option<String>,
    /// Input identifier forwarded to workers
    pub source: Option<String>,
    /// Bytes per chunk
    pub chunk_size: usize,
    /// Chunks per work unit
    pub work_unit_size: usize,
    /// Maximum outstanding work units
    pub max_concurrency: usize,
}

impl Default for DistributedConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            source: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            work_unit_size: DEFAULT_WORK_UNIT_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}
