pub mod level;
pub mod parallel;
pub mod proof;
pub mod recursive;
pub mod strategy;
pub mod tree;

pub use level::{combine_level, natural_height, parent_len, raise_to_height};
pub use parallel::{ParallelBuilder, DEFAULT_PARALLEL_THRESHOLD};
pub use proof::{
    generate_proof_from_leaves, verify_leaf_hash, verify_proof, MerkleProof, ProofStep, Side,
};
pub use recursive::{aligned_hashes, PartialRoot, RecursiveBuilder, DEFAULT_RECURSIVE_THRESHOLD};
pub use strategy::BuildStrategy;
pub use tree::{build_root, build_root_to_height, MerkleTree};
