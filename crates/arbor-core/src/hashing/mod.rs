//! Digest algorithms and the leaf hasher
//!
//! The tree engine is generic over [`HashingAlgorithm`]. Leaves and internal
//! nodes use the same digest with no domain-separation prefix: an internal
//! node is `hash(left || right)`.
//!
//! The algorithm is chosen once per computation. [`HashAlgorithm`] is the
//! runtime-selectable form used by configuration and the CLI.

pub mod blake3;
pub mod sha256;

pub use self::blake3::Blake3Algorithm;
pub use self::sha256::Sha256Algorithm;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MerkleError;
use crate::hash::NodeHash;

/// A fixed-output, collision-resistant digest function
///
/// Implementations must be stateless between calls: every call builds its own
/// digest context, so one value can be shared across rayon workers.
pub trait HashingAlgorithm: Send + Sync + Clone + 'static {
    /// Name of the algorithm, lowercase (e.g. `"sha256"`)
    fn algorithm_name(&self) -> &'static str;

    /// Hash raw bytes into a node hash
    fn hash(&self, data: &[u8]) -> NodeHash;

    /// Hash the concatenation `left || right`
    #[inline]
    fn hash_pair(&self, left: &NodeHash, right: &NodeHash) -> NodeHash {
        self.hash(&NodeHash::concat(left, right))
    }
}

/// Runtime-selectable digest algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("sha256") || name.eq_ignore_ascii_case("sha-256") {
            Ok(Self::Sha256)
        } else if name.eq_ignore_ascii_case("blake3") {
            Ok(Self::Blake3)
        } else {
            Err(MerkleError::UnsupportedAlgorithm(name.to_string()))
        }
    }
}

impl HashingAlgorithm for HashAlgorithm {
    fn algorithm_name(&self) -> &'static str {
        self.as_str()
    }

    #[inline]
    fn hash(&self, data: &[u8]) -> NodeHash {
        match self {
            Self::Sha256 => Sha256Algorithm.hash(data),
            Self::Blake3 => Blake3Algorithm.hash(data),
        }
    }
}

/// Hash every chunk into a leaf, in parallel, preserving input order
pub fn hash_leaves<A, C>(algorithm: &A, chunks: &[C]) -> Vec<NodeHash>
where
    A: HashingAlgorithm,
    C: AsRef<[u8]> + Sync,
{
    chunks
        .par_iter()
        .map(|chunk| algorithm.hash(chunk.as_ref()))
        .collect()
}
