//! Sequential Merkle tree builder
//!
//! Builds level by level with [`combine_level`] until a single hash remains.
//! [`MerkleTree`] keeps every level so proofs can be generated from it; the
//! `build_root*` functions keep only the current level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::level::{combine_level, natural_height, raise_to_height};
use crate::error::{MerkleError, MerkleResult};
use crate::hash::NodeHash;
use crate::hashing::HashingAlgorithm;

/// A fully materialised binary Merkle tree
///
/// `levels[0]` holds the leaves and the last level holds only the root.
/// Levels are stored un-padded: level `i + 1` has `ceil(len(level i) / 2)`
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    levels: Vec<Vec<NodeHash>>,
}

impl MerkleTree {
    /// Build the tree over `leaves`
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::EmptyInput`] if `leaves` is empty.
    pub fn build<A: HashingAlgorithm>(algorithm: &A, leaves: Vec<NodeHash>) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut levels = Vec::with_capacity(natural_height(leaves.len()));
        levels.push(leaves);

        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let parent = combine_level(algorithm, current);
            levels.push(parent);
        }

        debug!(
            leaves = levels[0].len(),
            height = levels.len(),
            "built merkle tree"
        );
        Ok(Self { levels })
    }

    /// Wrap levels produced by another builder
    ///
    /// The caller guarantees a non-empty leaf level and a single-element top.
    pub(crate) fn from_levels(levels: Vec<Vec<NodeHash>>) -> Self {
        debug_assert!(levels.last().is_some_and(|top| top.len() == 1));
        Self { levels }
    }

    /// Build the tree over raw chunks, hashing each chunk into a leaf
    pub fn from_chunks<A, C>(algorithm: &A, chunks: &[C]) -> MerkleResult<Self>
    where
        A: HashingAlgorithm,
        C: AsRef<[u8]> + Sync,
    {
        Self::build(algorithm, crate::hashing::hash_leaves(algorithm, chunks))
    }

    /// The root hash
    pub fn root(&self) -> NodeHash {
        // build() guarantees at least one level with exactly one element on top
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of levels, leaves included
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    pub fn leaves(&self) -> &[NodeHash] {
        &self.levels[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Level `index`, where 0 is the leaf level
    pub fn level(&self, index: usize) -> Option<&[NodeHash]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    pub fn levels(&self) -> &[Vec<NodeHash>] {
        &self.levels
    }

    /// Index of the first leaf equal to `leaf`
    pub fn leaf_index(&self, leaf: &NodeHash) -> Option<usize> {
        self.levels[0].iter().position(|candidate| candidate == leaf)
    }
}

/// Compute only the root of the tree over `leaves`
///
/// # Errors
///
/// Returns [`MerkleError::EmptyInput`] if `leaves` is empty.
pub fn build_root<A: HashingAlgorithm>(
    algorithm: &A,
    leaves: &[NodeHash],
) -> MerkleResult<NodeHash> {
    build_root_to_height(algorithm, leaves, natural_height(leaves.len()))
}

/// Compute the root of the tree over `leaves`, raised to `target_height`
///
/// Once a single root remains it is self-paired (`hash(root || root)`) until
/// the tree has `target_height` levels. This is what makes sub-trees of
/// different sizes combinable.
///
/// # Errors
///
/// - [`MerkleError::EmptyInput`] if `leaves` is empty
/// - [`MerkleError::HeightMismatch`] if `target_height` is below the natural height
pub fn build_root_to_height<A: HashingAlgorithm>(
    algorithm: &A,
    leaves: &[NodeHash],
    target_height: usize,
) -> MerkleResult<NodeHash> {
    let height = check_target(leaves.len(), target_height)?;

    let root = if leaves.len() == 1 {
        leaves[0]
    } else {
        let mut current = combine_level(algorithm, leaves);
        while current.len() > 1 {
            current = combine_level(algorithm, &current);
        }
        current[0]
    };

    Ok(raise_to_height(algorithm, root, height, target_height))
}

/// Validate a build request, returning the natural height
pub(crate) fn check_target(leaf_count: usize, target_height: usize) -> MerkleResult<usize> {
    if leaf_count == 0 {
        return Err(MerkleError::EmptyInput);
    }
    let height = natural_height(leaf_count);
    if target_height < height {
        return Err(MerkleError::HeightMismatch {
            expected: target_height,
            found: height,
        });
    }
    Ok(height)
}
