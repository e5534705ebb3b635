//! Parallel divide-and-conquer builder
//!
//! Builds level by level like the sequential builder, but the pairing work
//! inside a level is split recursively with `rayon::join` once a range is
//! wider than the threshold. Each branch owns a disjoint, pair-aligned index
//! range and returns its own buffer; the parent concatenates left then right.
//! The left half is offered to the pool for stealing while the right half
//! runs inline on the calling thread.
//!
//! The threshold only affects scheduling. Output is byte-identical to
//! [`MerkleTree::build`] for every threshold.

use tracing::debug;

use super::level::{hash_pairs, natural_height, parent_len, raise_to_height};
use super::tree::{check_target, MerkleTree};
use crate::error::{MerkleError, MerkleResult};
use crate::hash::NodeHash;
use crate::hashing::HashingAlgorithm;

/// Default number of level elements below which a range is hashed directly
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Level-by-level builder that parallelises pairing within each level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelBuilder {
    threshold: usize,
}

impl Default for ParallelBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl ParallelBuilder {
    /// Create a builder that stops splitting at `threshold` elements
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Combine one level into its parent level in parallel
    pub fn combine_level<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        level: &[NodeHash],
    ) -> Vec<NodeHash> {
        pair_range(algorithm, level, 0, level.len(), self.threshold)
    }

    /// Build the full tree, keeping every level
    pub fn build_tree<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: Vec<NodeHash>,
    ) -> MerkleResult<MerkleTree> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut levels = Vec::with_capacity(natural_height(leaves.len()));
        levels.push(leaves);
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let parent = self.combine_level(algorithm, current);
            levels.push(parent);
        }
        Ok(MerkleTree::from_levels(levels))
    }

    /// Compute only the root
    pub fn build_root<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
    ) -> MerkleResult<NodeHash> {
        self.build_root_to_height(algorithm, leaves, natural_height(leaves.len()))
    }

    /// Compute the root raised to `target_height` by self-pairing
    pub fn build_root_to_height<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
        target_height: usize,
    ) -> MerkleResult<NodeHash> {
        let height = check_target(leaves.len(), target_height)?;

        let root = if leaves.len() == 1 {
            leaves[0]
        } else {
            let mut current = self.combine_level(algorithm, leaves);
            while current.len() > 1 {
                current = self.combine_level(algorithm, &current);
            }
            current[0]
        };

        debug!(
            leaves = leaves.len(),
            threshold = self.threshold,
            height,
            target_height,
            "parallel root computed"
        );
        Ok(raise_to_height(algorithm, root, height, target_height))
    }
}

/// Hash the pairs of `level[start..end]`, splitting across the pool
///
/// `start` is always even. Only the right-most range can have odd width, and
/// its `end` is the level length, so padding stays correct.
fn pair_range<A: HashingAlgorithm>(
    algorithm: &A,
    level: &[NodeHash],
    start: usize,
    end: usize,
    threshold: usize,
) -> Vec<NodeHash> {
    let width = end - start;
    let pairs = parent_len(width);
    if width <= threshold || pairs < 2 {
        return hash_pairs(algorithm, level, start, end);
    }

    // Left half keeps an even element count so pairs never straddle branches
    let mid = start + (pairs / 2) * 2;
    // rayon::join runs its first closure inline and publishes the second
    let (right, left) = rayon::join(
        || pair_range(algorithm, level, mid, end, threshold),
        || pair_range(algorithm, level, start, mid, threshold),
    );

    let mut merged = Vec::with_capacity(left.len() + right.len());
    merged.extend(left);
    merged.extend(right);
    merged
}
