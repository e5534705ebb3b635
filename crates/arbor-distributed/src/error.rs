//! Error types for distributed computation

use arbor_core::MerkleError;
use thiserror::Error;

/// Errors from dispatching, computing or merging work units
#[derive(Error, Debug)]
pub enum DistributedError {
    /// Transport-level failure talking to an endpoint
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status
    #[error("Endpoint returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// The endpoint answered but the body is not a hash
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    /// A unit task panicked or was cancelled
    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The run failed because of this unit
    #[error("Work unit {sequence} failed: {source}")]
    UnitFailed {
        sequence: u64,
        #[source]
        source: Box<DistributedError>,
    },
}

impl From<reqwest::Error> for DistributedError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DistributedError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}

pub type DistributedResult<T> = Result<T, DistributedError>;
