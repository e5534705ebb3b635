//! Configuration sections

pub mod build;
pub mod distributed;
pub mod hashing;

pub use build::{BuildConfig, BuildStrategyKind};
pub use distributed::DistributedConfig;
pub use hashing::HashingConfig;
