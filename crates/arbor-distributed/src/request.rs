//! Wire format of a work request
//!
//! Workers receive a JSON object of the form
//! `{"fileName": "...", "chunkSize": 8, "skip": 0, "take": 16384, "targetHeight": 15}`
//! and answer with the hex-encoded sub-root as the response body.

use serde::{Deserialize, Serialize};

use crate::partition::WorkUnit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequest {
    /// Input identifier, resolved by the worker
    #[serde(rename = "fileName")]
    pub source: String,
    pub chunk_size: usize,
    pub skip: u64,
    pub take: u64,
    /// Height every sub-root is raised to before it is returned
    pub target_height: usize,
}

impl WorkRequest {
    pub fn for_unit(
        source: &str,
        chunk_size: usize,
        unit: &WorkUnit,
        target_height: usize,
    ) -> Self {
        Self {
            source: source.to_string(),
            chunk_size,
            skip: unit.skip,
            take: unit.take,
            target_height,
        }
    }
}
