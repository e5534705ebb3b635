//! Distributed Merkle root computation
//!
//! A large leaf range is split into work units, each unit's sub-root is
//! computed by a [`ComputeEndpoint`], and the sub-roots are merged with the
//! same tree engine used locally. Sub-roots are all raised to one common
//! height so the merge lines up.

pub mod endpoint;
pub mod error;
pub mod orchestrator;
pub mod partition;
pub mod request;
pub mod worker;

pub use endpoint::{
    parse_hash_body, ComputeEndpoint, FileSourceResolver, HttpEndpoint, LocalEndpoint,
    SourceResolver, StaticSourceResolver,
};
pub use error::{DistributedError, DistributedResult};
pub use orchestrator::{Orchestrator, RunReport};
pub use partition::{partition, WorkUnit};
pub use request::WorkRequest;
pub use worker::compute_partial_root;
