//! SHA256 digest implementation
//!
//! The default algorithm. Produces standard SHA256 digests, so roots can be
//! cross-checked against any other SHA256 Merkle implementation that uses
//! plain concatenation and duplicate-last padding.

use sha2::{Digest, Sha256};

use super::HashingAlgorithm;
use crate::hash::NodeHash;

/// SHA256-based hashing algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Algorithm;

impl HashingAlgorithm for Sha256Algorithm {
    fn algorithm_name(&self) -> &'static str {
        "sha256"
    }

    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        let digest: [u8; 32] = Sha256::digest(data).into();
        NodeHash::new(digest)
    }

    #[inline]
    fn hash_pair(&self, left: &NodeHash, right: &NodeHash) -> NodeHash {
        let mut hasher = Sha256::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        NodeHash::new(hasher.finalize().into())
    }
}
