//! Error Types
//!
//! Error handling for tree construction, proofs and chunk reading.

use thiserror::Error;

/// Error type for Merkle operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A builder was asked to hash zero leaves
    #[error("Cannot build a Merkle tree from an empty leaf sequence")]
    EmptyInput,

    /// Proof generation could not find the requested leaf
    #[error("Leaf not found: {hash}")]
    LeafNotFound { hash: String },

    /// Leaf index is outside the tree
    #[error("Leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    /// Sub-trees of different heights were about to be combined
    #[error("Height mismatch: expected {expected}, found {found}")]
    HeightMismatch { expected: usize, found: usize },

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unsupported build strategy: {0}")]
    UnsupportedStrategy(String),

    #[error("Invalid hash format: {0}")]
    InvalidHash(String),

    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for Merkle operations
pub type MerkleResult<T> = Result<T, MerkleError>;

impl From<std::io::Error> for MerkleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
