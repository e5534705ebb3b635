//! Library half of the `arbor` binary, exposed for integration tests

pub mod cli;
pub mod commands;
