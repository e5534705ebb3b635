//! Merkle audit proofs
//!
//! A proof lists, from the leaf level upward, the sibling hash at each level
//! and which side of the running hash it sits on. Verification re-hashes
//! along that path and compares the result with the expected root.
//!
//! A leaf that is the unpaired last element of an odd level is its own
//! sibling, matching the duplicate-last padding used when building.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::level::combine_level;
use super::tree::MerkleTree;
use crate::error::{MerkleError, MerkleResult};
use crate::hash::NodeHash;
use crate::hashing::HashingAlgorithm;

/// Position of the sibling relative to the running hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left operand: `hash(sibling || running)`
    Left,
    /// Sibling is the right operand: `hash(running || sibling)`
    Right,
}

impl Side {
    /// Side of the sibling of the node at `index` within its level
    #[inline]
    pub fn of_sibling(index: usize) -> Self {
        if index % 2 == 1 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// One level of a proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: NodeHash,
    pub side: Side,
}

/// Ordered sibling path from a leaf to the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    steps: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Number of steps, i.e. tree height minus one
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True only for the proof of a single-leaf tree
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recompute the root implied by this proof for `leaf_hash`
    pub fn compute_root<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaf_hash: &NodeHash,
    ) -> NodeHash {
        self.steps.iter().fold(*leaf_hash, |running, step| match step.side {
            Side::Left => algorithm.hash_pair(&step.sibling, &running),
            Side::Right => algorithm.hash_pair(&running, &step.sibling),
        })
    }
}

impl MerkleTree {
    /// Generate the proof for the first leaf equal to `leaf_hash`
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::LeafNotFound`] if no leaf matches.
    pub fn generate_proof(&self, leaf_hash: &NodeHash) -> MerkleResult<MerkleProof> {
        let index = self
            .leaf_index(leaf_hash)
            .ok_or_else(|| MerkleError::LeafNotFound {
                hash: leaf_hash.to_hex(),
            })?;
        self.proof_at(index)
    }

    /// Generate the proof for the leaf at `index`
    pub fn proof_at(&self, mut index: usize) -> MerkleResult<MerkleProof> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            });
        }

        let levels = self.levels();
        let mut steps = Vec::with_capacity(levels.len() - 1);
        for level in &levels[..levels.len() - 1] {
            steps.push(sibling_step(level, index));
            index /= 2;
        }
        Ok(MerkleProof::new(steps))
    }
}

fn sibling_step(level: &[NodeHash], index: usize) -> ProofStep {
    let sibling = level.get(index ^ 1).unwrap_or(&level[index]);
    ProofStep {
        sibling: *sibling,
        side: Side::of_sibling(index),
    }
}

/// Generate a proof from a raw leaf batch without keeping the whole tree
///
/// Only the level currently being walked is held in memory.
///
/// # Errors
///
/// Returns [`MerkleError::LeafNotFound`] if `leaf_hash` is not in `leaves`.
pub fn generate_proof_from_leaves<A: HashingAlgorithm>(
    algorithm: &A,
    leaves: &[NodeHash],
    leaf_hash: &NodeHash,
) -> MerkleResult<MerkleProof> {
    let mut index = leaves
        .iter()
        .position(|leaf| leaf == leaf_hash)
        .ok_or_else(|| MerkleError::LeafNotFound {
            hash: leaf_hash.to_hex(),
        })?;

    let mut steps = Vec::new();
    let mut current: Cow<'_, [NodeHash]> = Cow::Borrowed(leaves);
    while current.len() > 1 {
        steps.push(sibling_step(&current, index));
        current = Cow::Owned(combine_level(algorithm, &current));
        index /= 2;
    }
    Ok(MerkleProof::new(steps))
}

/// Verify that `leaf_data` belongs to the tree with root `expected_root`
///
/// A malformed proof yields `false`, never an error.
pub fn verify_proof<A: HashingAlgorithm>(
    algorithm: &A,
    leaf_data: &[u8],
    proof: &MerkleProof,
    expected_root: &NodeHash,
) -> bool {
    verify_leaf_hash(algorithm, &algorithm.hash(leaf_data), proof, expected_root)
}

/// Verify starting from an already-hashed leaf
pub fn verify_leaf_hash<A: HashingAlgorithm>(
    algorithm: &A,
    leaf_hash: &NodeHash,
    proof: &MerkleProof,
    expected_root: &NodeHash,
) -> bool {
    proof.compute_root(algorithm, leaf_hash) == *expected_root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::Sha256Algorithm;

    fn chunks(n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| format!("chunk-{i}").into_bytes()).collect()
    }

    #[test]
    fn test_side_of_sibling() {
        assert_eq!(Side::of_sibling(0), Side::Right);
        assert_eq!(Side::of_sibling(1), Side::Left);
        assert_eq!(Side::of_sibling(4), Side::Right);
    }

    #[test]
    fn test_every_leaf_verifies() {
        let data = chunks(11);
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &data).unwrap();
        let root = tree.root();

        for chunk in &data {
            let leaf = Sha256Algorithm.hash(chunk);
            let proof = tree.generate_proof(&leaf).unwrap();
            assert_eq!(proof.len(), tree.height() - 1);
            assert!(verify_proof(&Sha256Algorithm, chunk, &proof, &root));
        }
    }

    #[test]
    fn test_padded_leaf_is_its_own_sibling() {
        let data = chunks(5);
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &data).unwrap();
        let proof = tree.proof_at(4).unwrap();

        assert_eq!(proof.steps()[0].sibling, tree.leaves()[4]);
        assert_eq!(proof.steps()[0].side, Side::Right);
        assert!(verify_proof(&Sha256Algorithm, &data[4], &proof, &tree.root()));
    }

    #[test]
    fn test_leaf_not_found_is_explicit() {
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &chunks(4)).unwrap();
        let missing = Sha256Algorithm.hash(b"missing");

        assert!(matches!(
            tree.generate_proof(&missing),
            Err(MerkleError::LeafNotFound { .. })
        ));
        assert!(matches!(
            generate_proof_from_leaves(&Sha256Algorithm, tree.leaves(), &missing),
            Err(MerkleError::LeafNotFound { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &chunks(3)).unwrap();
        assert_eq!(
            tree.proof_at(3).unwrap_err(),
            MerkleError::IndexOutOfRange {
                index: 3,
                leaf_count: 3
            }
        );
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        let data = chunks(1);
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &data).unwrap();
        let proof = tree.proof_at(0).unwrap();

        assert!(proof.is_empty());
        assert!(verify_proof(&Sha256Algorithm, &data[0], &proof, &tree.root()));
    }

    #[test]
    fn test_proof_from_leaves_matches_tree() {
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &chunks(13)).unwrap();
        for leaf in tree.leaves() {
            let from_tree = tree.generate_proof(leaf).unwrap();
            let from_batch =
                generate_proof_from_leaves(&Sha256Algorithm, tree.leaves(), leaf).unwrap();
            assert_eq!(from_tree, from_batch);
        }
    }

    #[test]
    fn test_tampered_sibling_fails() {
        let data = chunks(8);
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &data).unwrap();
        let proof = tree.proof_at(3).unwrap();

        let mut steps = proof.steps().to_vec();
        let mut bytes: [u8; 32] = steps[1].sibling.as_bytes().try_into().unwrap();
        bytes[0] ^= 0x01;
        steps[1].sibling = NodeHash::new(bytes);

        let tampered = MerkleProof::new(steps);
        assert!(!verify_proof(&Sha256Algorithm, &data[3], &tampered, &tree.root()));
    }

    #[test]
    fn test_truncated_proof_fails() {
        let data = chunks(8);
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &data).unwrap();
        let proof = tree.proof_at(2).unwrap();
        let truncated = MerkleProof::new(proof.steps()[..proof.len() - 1].to_vec());

        assert!(!verify_proof(&Sha256Algorithm, &data[2], &truncated, &tree.root()));
    }

    #[test]
    fn test_proof_serialization() {
        let tree = MerkleTree::from_chunks(&Sha256Algorithm, &chunks(4)).unwrap();
        let proof = tree.proof_at(1).unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.contains("\"left\""));
        let restored: MerkleProof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, restored);
    }
}
