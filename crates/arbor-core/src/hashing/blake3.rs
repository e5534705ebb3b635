//! BLAKE3 digest implementation
//!
//! Faster than SHA256 on modern CPUs. Roots computed with BLAKE3 are not
//! comparable to SHA256 roots; pick one per computation.

use super::HashingAlgorithm;
use crate::hash::NodeHash;

/// BLAKE3-based hashing algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Algorithm;

impl HashingAlgorithm for Blake3Algorithm {
    fn algorithm_name(&self) -> &'static str {
        "blake3"
    }

    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        NodeHash::new(*blake3::hash(data).as_bytes())
    }

    #[inline]
    fn hash_pair(&self, left: &NodeHash, right: &NodeHash) -> NodeHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        NodeHash::new(*hasher.finalize().as_bytes())
    }
}
