//! Level combination and height arithmetic
//!
//! Padding policy: when a level has odd length, its last element is
//! duplicated *before* pairing, so element `2i` is always paired with
//! `2i + 1`. Every builder in this crate uses this one rule.

use crate::hash::NodeHash;
use crate::hashing::HashingAlgorithm;

/// Height of the tree naturally built over `leaf_count` leaves
///
/// Height counts levels, leaves included: one leaf has height 1, two leaves
/// height 2, three or four leaves height 3. Returns 0 for no leaves.
pub fn natural_height(leaf_count: usize) -> usize {
    match leaf_count {
        0 => 0,
        n => n.next_power_of_two().trailing_zeros() as usize + 1,
    }
}

/// Number of parents produced from a level of `len` elements
#[inline]
pub fn parent_len(len: usize) -> usize {
    len.div_ceil(2)
}

/// Hash one pair per output slot of `level[start..end]`
///
/// `start` must be even. A trailing unpaired element is paired with itself,
/// which is only correct when `end == level.len()`.
pub(crate) fn hash_pairs<A: HashingAlgorithm>(
    algorithm: &A,
    level: &[NodeHash],
    start: usize,
    end: usize,
) -> Vec<NodeHash> {
    debug_assert!(start % 2 == 0);
    let mut parents = Vec::with_capacity(parent_len(end - start));
    let mut i = start;
    while i < end {
        let left = &level[i];
        let right = level.get(i + 1).filter(|_| i + 1 < end).unwrap_or(left);
        parents.push(algorithm.hash_pair(left, right));
        i += 2;
    }
    parents
}

/// Combine a level into its parent level
///
/// The caller guarantees a non-empty level; an empty level yields an empty
/// parent.
pub fn combine_level<A: HashingAlgorithm>(algorithm: &A, level: &[NodeHash]) -> Vec<NodeHash> {
    hash_pairs(algorithm, level, 0, level.len())
}

/// Raise a root by self-pairing until it reaches `target_height`
///
/// `height` is the height of the tree `root` currently tops.
pub fn raise_to_height<A: HashingAlgorithm>(
    algorithm: &A,
    mut root: NodeHash,
    height: usize,
    target_height: usize,
) -> NodeHash {
    for _ in height..target_height {
        root = algorithm.hash_pair(&root, &root);
    }
    root
}
