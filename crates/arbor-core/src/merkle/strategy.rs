//! Builder strategy selection
//!
//! One entry point over the three builders so callers (the CLI, the
//! distributed worker) can pick a strategy from configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::level::natural_height;
use super::parallel::ParallelBuilder;
use super::recursive::RecursiveBuilder;
use super::tree::{build_root_to_height, MerkleTree};
use crate::error::{MerkleError, MerkleResult};
use crate::hash::NodeHash;
use crate::hashing::HashingAlgorithm;

/// How a root is computed. Every variant yields the same root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BuildStrategy {
    /// Level-by-level on the calling thread
    Sequential,
    /// Level-by-level, pairing split across the rayon pool
    Parallel { threshold: usize },
    /// Fixed-size groups combined recursively
    Recursive { threshold: usize },
}

impl Default for BuildStrategy {
    fn default() -> Self {
        Self::Parallel {
            threshold: super::parallel::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Parallel { threshold } => write!(f, "parallel(threshold={})", threshold),
            Self::Recursive { threshold } => write!(f, "recursive(threshold={})", threshold),
        }
    }
}

impl BuildStrategy {
    /// Parse a strategy name as used in configuration and on the command line
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::UnsupportedStrategy`] for unknown names.
    pub fn parse(name: &str, threshold: usize) -> MerkleResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sequential" | "standard" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel { threshold }),
            "recursive" => Ok(Self::Recursive { threshold }),
            other => Err(MerkleError::UnsupportedStrategy(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel { .. } => "parallel",
            Self::Recursive { .. } => "recursive",
        }
    }

    /// Compute the root over `leaves`
    pub fn root<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
    ) -> MerkleResult<NodeHash> {
        self.root_to_height(algorithm, leaves, natural_height(leaves.len()))
    }

    /// Compute the root over `leaves` raised to `target_height`
    pub fn root_to_height<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: &[NodeHash],
        target_height: usize,
    ) -> MerkleResult<NodeHash> {
        match *self {
            Self::Sequential => build_root_to_height(algorithm, leaves, target_height),
            Self::Parallel { threshold } => {
                ParallelBuilder::new(threshold).build_root_to_height(
                    algorithm,
                    leaves,
                    target_height,
                )
            }
            Self::Recursive { threshold } => {
                RecursiveBuilder::new(threshold).build_root_to_height(
                    algorithm,
                    leaves,
                    target_height,
                )
            }
        }
    }

    /// Materialise every level, e.g. for proof generation
    ///
    /// The recursive strategy never holds whole levels, so it materialises
    /// sequentially.
    pub fn build_tree<A: HashingAlgorithm>(
        &self,
        algorithm: &A,
        leaves: Vec<NodeHash>,
    ) -> MerkleResult<MerkleTree> {
        match *self {
            Self::Parallel { threshold } => {
                ParallelBuilder::new(threshold).build_tree(algorithm, leaves)
            }
            Self::Sequential | Self::Recursive { .. } => MerkleTree::build(algorithm, leaves),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::Sha256Algorithm;

    #[test]
    fn test_parse_strategies() {
        assert_eq!(BuildStrategy::parse("sequential", 8).unwrap(), BuildStrategy::Sequential);
        assert_eq!(
            BuildStrategy::parse("Parallel", 8).unwrap(),
            BuildStrategy::Parallel { threshold: 8 }
        );
        assert_eq!(
            BuildStrategy::parse("recursive", 16).unwrap(),
            BuildStrategy::Recursive { threshold: 16 }
        );
        assert!(matches!(
            BuildStrategy::parse("quantum", 1),
            Err(MerkleError::UnsupportedStrategy(_))
        ));
    }

    #[test]
    fn test_all_strategies_agree() {
        let leaves: Vec<NodeHash> = (0..77u32)
            .map(|i| Sha256Algorithm.hash(&i.to_be_bytes()))
            .collect();
        let strategies = [
            BuildStrategy::Sequential,
            BuildStrategy::Parallel { threshold: 4 },
            BuildStrategy::Recursive { threshold: 4 },
        ];

        let roots: Vec<NodeHash> = strategies
            .iter()
            .map(|s| s.root(&Sha256Algorithm, &leaves).unwrap())
            .collect();
        assert!(roots.windows(2).all(|w| w[0] == w[1]));

        for strategy in strategies {
            let tree = strategy.build_tree(&Sha256Algorithm, leaves.clone()).unwrap();
            assert_eq!(tree.root(), roots[0]);
        }
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&BuildStrategy::Recursive { threshold: 64 }).unwrap();
        assert_eq!(json, r#"{"kind":"recursive","threshold":64}"#);

        let parsed: BuildStrategy = serde_json::from_str(r#"{"kind":"sequential"}"#).unwrap();
        assert_eq!(parsed, BuildStrategy::Sequential);
    }
}
