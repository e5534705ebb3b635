//! Compute endpoints
//!
//! The orchestrator only sees [`ComputeEndpoint`]: something that takes a
//! [`WorkRequest`] and eventually yields a sub-root. [`HttpEndpoint`] posts
//! the request to a remote worker; [`LocalEndpoint`] runs the worker routine
//! in-process on tokio's blocking pool.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use arbor_core::{BuildStrategy, ChunkSource, FileChunkSource, HashingAlgorithm, NodeHash};

use crate::error::{DistributedError, DistributedResult};
use crate::request::WorkRequest;
use crate::worker::compute_partial_root;

/// A place work requests can be sent to
#[async_trait]
pub trait ComputeEndpoint: Send + Sync {
    /// Compute the sub-root for `request`
    async fn compute(&self, request: &WorkRequest) -> DistributedResult<NodeHash>;
}

/// Remote worker reached over HTTP
///
/// The request is POSTed as JSON; a 2xx response body must contain the
/// hex-encoded sub-root (surrounding whitespace and quotes are tolerated).
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ComputeEndpoint for HttpEndpoint {
    async fn compute(&self, request: &WorkRequest) -> DistributedResult<NodeHash> {
        let response = self.client.post(&self.url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DistributedError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_hash_body(&body)
    }
}

/// Parse a worker response body into a hash
pub fn parse_hash_body(body: &str) -> DistributedResult<NodeHash> {
    let trimmed = body.trim().trim_matches('"');
    NodeHash::from_hex(trimmed)
        .map_err(|e| DistributedError::InvalidResponse(format!("{e} (body: {trimmed:?})")))
}

/// Maps the source named in a request to readable chunks
pub trait SourceResolver: Send + Sync {
    fn resolve(&self, source: &str, chunk_size: usize) -> DistributedResult<Arc<dyn ChunkSource>>;
}

/// Resolves sources as file paths, optionally under a base directory
#[derive(Debug, Clone, Default)]
pub struct FileSourceResolver {
    base_dir: Option<PathBuf>,
}

impl FileSourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative source names against `base_dir`
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: Some(base_dir.as_ref().to_path_buf()),
        }
    }
}

impl SourceResolver for FileSourceResolver {
    fn resolve(&self, source: &str, chunk_size: usize) -> DistributedResult<Arc<dyn ChunkSource>> {
        let path = match &self.base_dir {
            Some(base) => base.join(source),
            None => PathBuf::from(source),
        };
        Ok(Arc::new(FileChunkSource::open(path, chunk_size)?))
    }
}

/// Serves one shared source whatever name is requested
#[derive(Clone)]
pub struct StaticSourceResolver {
    source: Arc<dyn ChunkSource>,
}

impl StaticSourceResolver {
    pub fn new(source: Arc<dyn ChunkSource>) -> Self {
        Self { source }
    }
}

impl SourceResolver for StaticSourceResolver {
    fn resolve(
        &self,
        _source: &str,
        _chunk_size: usize,
    ) -> DistributedResult<Arc<dyn ChunkSource>> {
        Ok(Arc::clone(&self.source))
    }
}

/// In-process endpoint running the worker routine on the blocking pool
pub struct LocalEndpoint<A: HashingAlgorithm> {
    algorithm: A,
    strategy: BuildStrategy,
    resolver: Arc<dyn SourceResolver>,
}

impl<A: HashingAlgorithm> LocalEndpoint<A> {
    pub fn new(algorithm: A, strategy: BuildStrategy, resolver: Arc<dyn SourceResolver>) -> Self {
        Self {
            algorithm,
            strategy,
            resolver,
        }
    }
}

#[async_trait]
impl<A: HashingAlgorithm> ComputeEndpoint for LocalEndpoint<A> {
    async fn compute(&self, request: &WorkRequest) -> DistributedResult<NodeHash> {
        let algorithm = self.algorithm.clone();
        let strategy = self.strategy;
        let resolver = Arc::clone(&self.resolver);
        let request = request.clone();

        debug!(skip = request.skip, take = request.take, "computing unit locally");
        tokio::task::spawn_blocking(move || {
            let source = resolver.resolve(&request.source, request.chunk_size)?;
            compute_partial_root(&algorithm, &strategy, source.as_ref(), &request)
        })
        .await?
    }
}
