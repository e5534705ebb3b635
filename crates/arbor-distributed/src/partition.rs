//! Splitting a leaf range into work units

use serde::{Deserialize, Serialize};

use crate::error::{DistributedError, DistributedResult};
use arbor_core::MerkleError;

/// A contiguous leaf range `[skip, skip + take)` computed as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkUnit {
    /// Position of this unit's sub-root among all sub-roots
    pub sequence: u64,
    /// Index of the first leaf
    pub skip: u64,
    /// Number of leaves; only the last unit may be short
    pub take: u64,
}

/// Partition `total` leaves into units of `unit_size`
///
/// # Errors
///
/// - [`DistributedError::Config`] if `unit_size` is zero
/// - [`MerkleError::EmptyInput`] if `total` is zero
pub fn partition(total: u64, unit_size: u64) -> DistributedResult<Vec<WorkUnit>> {
    if unit_size == 0 {
        return Err(DistributedError::Config(
            "work unit size must be at least 1".to_string(),
        ));
    }
    if total == 0 {
        return Err(MerkleError::EmptyInput.into());
    }

    let units = (0..total.div_ceil(unit_size))
        .map(|sequence| {
            let skip = sequence * unit_size;
            WorkUnit {
                sequence,
                skip,
                take: unit_size.min(total - skip),
            }
        })
        .collect();
    Ok(units)
}
