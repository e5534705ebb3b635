use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

use arbor_config::ArborConfig;
use arbor_core::{hash_leaves, BuildStrategy, FileChunkSource, HashAlgorithm, NodeHash};

use super::resolve_strategy;
use crate::cli::StrategyArg;

/// Result of a local root computation
#[derive(Debug, Clone)]
pub struct RootOutcome {
    pub root: NodeHash,
    pub leaves: usize,
    pub height: usize,
    pub elapsed: Duration,
}

/// Hash every complete chunk of `file` and build the root with `strategy`
pub fn compute_file_root(
    algorithm: HashAlgorithm,
    strategy: BuildStrategy,
    file: &Path,
    chunk_size: usize,
) -> Result<RootOutcome> {
    let started = Instant::now();
    let source = FileChunkSource::open(file, chunk_size)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let chunks = source.read_all()?;
    let leaves = hash_leaves(&algorithm, &chunks);
    let root = strategy.root(&algorithm, &leaves)?;

    Ok(RootOutcome {
        root,
        leaves: leaves.len(),
        height: arbor_core::natural_height(leaves.len()),
        elapsed: started.elapsed(),
    })
}

pub async fn execute(
    config: &ArborConfig,
    file: PathBuf,
    chunk_size: Option<usize>,
    strategy: Option<StrategyArg>,
    threshold: Option<usize>,
) -> Result<()> {
    let algorithm = config.hashing.algorithm()?;
    let strategy = resolve_strategy(config, strategy, threshold)?;
    let chunk_size = chunk_size.unwrap_or(config.distributed.chunk_size);

    info!(file = %file.display(), chunk_size, %algorithm, %strategy, "computing root");
    let outcome = tokio::task::spawn_blocking(move || {
        compute_file_root(algorithm, strategy, &file, chunk_size)
    })
    .await??;

    println!("root: {}", outcome.root);
    println!("leaves: {}", outcome.leaves);
    println!("height: {}", outcome.height);
    println!("algorithm: {}", algorithm);
    println!("strategy: {}", strategy);
    println!("elapsed_ms: {}", outcome.elapsed.as_millis());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::{HashingAlgorithm, MerkleTree};
    use std::io::Write;

    #[test]
    fn test_compute_file_root() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"aaaabbbbccccddddeeeeff").unwrap();
        file.flush().unwrap();

        let outcome = compute_file_root(
            HashAlgorithm::Sha256,
            BuildStrategy::Recursive { threshold: 2 },
            file.path(),
            4,
        )
        .unwrap();

        let chunks = [b"aaaa", b"bbbb", b"cccc", b"dddd", b"eeee"];
        let expected = MerkleTree::from_chunks(&HashAlgorithm::Sha256, &chunks).unwrap();
        assert_eq!(outcome.root, expected.root());
        assert_eq!(outcome.leaves, 5);
        assert_eq!(outcome.height, 4);
        assert_ne!(outcome.root, HashAlgorithm::Blake3.hash(b"aaaa"));
    }

    #[test]
    fn test_file_shorter_than_one_chunk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        file.flush().unwrap();

        let result = compute_file_root(
            HashAlgorithm::Sha256,
            BuildStrategy::Sequential,
            file.path(),
            8,
        );
        assert!(result.is_err());
    }
}
