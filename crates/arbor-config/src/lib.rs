//! # Arbor Configuration
//!
//! Typed TOML configuration for hashing, local tree building and
//! distributed runs.
//!
//! ```toml
//! [hashing]
//! algorithm = "sha256"
//!
//! [build]
//! strategy = "parallel"
//! threshold = 1024
//!
//! [distributed]
//! endpoint_url = "http://localhost:9000/compute"
//! source = "data.bin"
//! chunk_size = 8
//! work_unit_size = 16384
//! max_concurrency = 300
//! ```

pub mod components;
mod config;
mod error;

pub use components::*;
pub use config::ArborConfig;
pub use error::{ConfigError, ConfigResult};
