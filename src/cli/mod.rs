//! Command-line interface for the quorum wallet

pub mod commands;

pub use commands::{cmd_address, cmd_demo, CliResult};
