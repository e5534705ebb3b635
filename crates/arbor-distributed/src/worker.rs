//! The routine a worker runs for one work request

use tracing::debug;

use arbor_core::{hash_leaves, BuildStrategy, ChunkSource, HashingAlgorithm, MerkleError, NodeHash};

use crate::error::{DistributedError, DistributedResult};
use crate::request::WorkRequest;

/// Compute the sub-root of the leaves named by `request`
///
/// Reads up to `take` chunks starting at `skip`, hashes them into leaves and
/// builds their root with `strategy`, raised to the request's target height.
/// A short read at the end of the input yields a smaller sub-tree; no chunks
/// at all is [`MerkleError::EmptyInput`].
pub fn compute_partial_root<A, S>(
    algorithm: &A,
    strategy: &BuildStrategy,
    source: &S,
    request: &WorkRequest,
) -> DistributedResult<NodeHash>
where
    A: HashingAlgorithm,
    S: ChunkSource + ?Sized,
{
    if source.chunk_size() != request.chunk_size {
        return Err(DistributedError::Config(format!(
            "source chunk size {} does not match requested {}",
            source.chunk_size(),
            request.chunk_size
        )));
    }

    let take = usize::try_from(request.take)
        .map_err(|_| DistributedError::Config(format!("take {} too large", request.take)))?;
    let chunks = source.read(request.skip, take)?;
    if chunks.is_empty() {
        return Err(MerkleError::EmptyInput.into());
    }

    let leaves = hash_leaves(algorithm, &chunks);
    let root = strategy.root_to_height(algorithm, &leaves, request.target_height)?;

    debug!(
        skip = request.skip,
        leaves = leaves.len(),
        target_height = request.target_height,
        strategy = %strategy,
        "computed partial root"
    );
    Ok(root)
}
