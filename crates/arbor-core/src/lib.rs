//! Merkle root computation over chunked data
//!
//! Leaves are the hashes of fixed-size chunks. Three builders compute the
//! same root: [`merkle::build_root`] level by level, [`ParallelBuilder`]
//! with each level's pairing split across the rayon pool, and
//! [`RecursiveBuilder`] over independently computed sub-roots.

pub mod error;
pub mod hash;
pub mod hashing;
pub mod merkle;
pub mod source;

pub use error::{MerkleError, MerkleResult};
pub use hash::NodeHash;
pub use hashing::{hash_leaves, Blake3Algorithm, HashAlgorithm, HashingAlgorithm, Sha256Algorithm};
pub use merkle::{
    aligned_hashes, build_root, build_root_to_height, combine_level, generate_proof_from_leaves,
    natural_height, raise_to_height, verify_leaf_hash, verify_proof, BuildStrategy, MerkleProof,
    MerkleTree, ParallelBuilder, PartialRoot, ProofStep, RecursiveBuilder, Side,
    DEFAULT_PARALLEL_THRESHOLD, DEFAULT_RECURSIVE_THRESHOLD,
};
pub use source::{ChunkSource, FileChunkSource, MemoryChunkSource};
