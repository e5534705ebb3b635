use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use arbor_config::ArborConfig;
use arbor_core::{hash_leaves, verify_proof, FileChunkSource};

use super::resolve_strategy;

pub async fn execute(
    config: &ArborConfig,
    file: PathBuf,
    chunk_size: Option<usize>,
    index: usize,
    json: bool,
) -> Result<()> {
    let algorithm = config.hashing.algorithm()?;
    let strategy = resolve_strategy(config, None, None)?;
    let chunk_size = chunk_size.unwrap_or(config.distributed.chunk_size);

    let source = FileChunkSource::open(&file, chunk_size)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let chunks = source.read_all()?;
    if index >= chunks.len() {
        bail!(
            "Chunk index {} out of range: {} has {} complete chunks of {} bytes",
            index,
            file.display(),
            chunks.len(),
            chunk_size
        );
    }

    let tree = strategy.build_tree(&algorithm, hash_leaves(&algorithm, &chunks))?;
    let proof = tree.proof_at(index)?;
    let root = tree.root();
    let verified = verify_proof(&algorithm, &chunks[index], &proof, &root);

    if json {
        let output = serde_json::json!({
            "index": index,
            "leaf": tree.leaves()[index],
            "root": root,
            "algorithm": algorithm,
            "proof": proof,
            "verified": verified,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("leaf {}: {}", index, tree.leaves()[index]);
        println!("root: {}", root);
        for (level, step) in proof.steps().iter().enumerate() {
            println!("  level {}: {:?} {}", level, step.side, step.sibling);
        }
        println!("verified: {}", verified);
    }

    if !verified {
        bail!("Proof for chunk {} did not verify", index);
    }
    Ok(())
}
