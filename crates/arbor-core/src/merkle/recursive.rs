//! Recursive partial-tree builder
//!
//! Partitions the leaves up front into groups of `group_size()` elements,
//! computes every group's sub-root concurrently, then combines the sub-roots
//! the same way. No single level over all leaves is ever materialised.
//!
//! ## Height alignment
//!
//! Every sub-root is raised to the height of a full group before it is
//! combined with its siblings, so the short trailing group lines up with the
//! others. The group size is the threshold rounded up to a power of two
//! (minimum 2): group boundaries then coincide with sub-tree boundaries of
//! the sequential tree and the root does not depend on the threshold.
//!
//! Each [`PartialRoot`] carries the height its hash actually tops, so a
//! sub-root that could not be lowered to the group height is rejected by
//! [`aligned_hashes`] rather than combined.

use rayon::prelude::*;
use tracing::debug;

use super::level::{natural_height, raise_to_height};
use super::tree::{build_root, check_target};
use crate::error::{MerkleError, MerkleResult};
use crate::hash::NodeHash;
use crate::hashing::HashingAlgorithm;

/// Default group size for the recursive builder
pub const DEFAULT_RECURSIVE_THRESHOLD: usize = 1024;

/// The root of a sub-tree together with the height of the tree it tops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialRoot {
    pub hash: NodeHash,
    pub height: usize,
}

/// Builder that combines independently computed sub-roots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursiveBuilder {
    threshold: usize,
}

impl Default for RecursiveBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_RECURSIVE_THRESHOLD)
    }
}

impl RecursiveBuilder {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Effective number of leaves per group
    pub fn group_size(&self) -> usize {
        self.threshold
            .max(2)
            .checked_next_power_of_two()
            .unwrap_or(1 << (usize::BITS - 1))
    }

    /// Compute the root of the tree over `leaves`
    pub fn build_root<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
    ) -> MerkleResult<NodeHash> {
        self.build_root_to_height(algorithm, leaves, natural_height(leaves.len()))
    }

    /// Compute the root raised to `target_height`
    pub fn build_root_to_height<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
        target_height: usize,
    ) -> MerkleResult<NodeHash> {
        check_target(leaves.len(), target_height)?;
        let partial = self.partial_root(algorithm, leaves, target_height, 0)?;
        if partial.height != target_height {
            return Err(MerkleError::HeightMismatch {
                expected: target_height,
                found: partial.height,
            });
        }
        Ok(partial.hash)
    }

    /// Root of `leaves` raised towards `target_height`
    ///
    /// A sub-tree is never lowered: when `target_height` is below the natural
    /// height the returned partial reports the natural height instead.
    fn partial_root<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
        target_height: usize,
        depth: usize,
    ) -> MerkleResult<PartialRoot> {
        let group = self.group_size();
        if leaves.len() <= group {
            let natural = natural_height(leaves.len());
            let root = build_root(algorithm, leaves)?;
            let height = natural.max(target_height);
            return Ok(PartialRoot {
                hash: raise_to_height(algorithm, root, natural, height),
                height,
            });
        }

        let group_height = natural_height(group);
        let partials = leaves
            .par_chunks(group)
            .map(|chunk| self.partial_root(algorithm, chunk, group_height, depth + 1))
            .collect::<MerkleResult<Vec<_>>>()?;
        let sub_roots = aligned_hashes(&partials, group_height)?;

        debug!(
            depth,
            leaves = leaves.len(),
            groups = sub_roots.len(),
            group_height,
            "combining partial roots"
        );

        // The sub-roots already account for group_height - 1 levels
        let below = group_height - 1;
        let remaining = target_height.saturating_sub(below);
        let combined = self.partial_root(algorithm, &sub_roots, remaining, depth + 1)?;
        Ok(PartialRoot {
            hash: combined.hash,
            height: combined.height + below,
        })
    }
}

/// Extract the hashes of sibling partial roots, checking they share a height
///
/// # Errors
///
/// Returns [`MerkleError::HeightMismatch`] for the first partial whose height
/// differs from `expected_height`. Combining such roots would silently produce
/// a wrong root.
pub fn aligned_hashes(
    partials: &[PartialRoot],
    expected_height: usize,
) -> MerkleResult<Vec<NodeHash>> {
    partials
        .iter()
        .map(|partial| {
            if partial.height == expected_height {
                Ok(partial.hash)
            } else {
                Err(MerkleError::HeightMismatch {
                    expected: expected_height,
                    found: partial.height,
                })
            }
        })
        .collect()
}
