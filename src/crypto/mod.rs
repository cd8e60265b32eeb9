//! Cryptographic utilities
//!
//! This module provides the SHA-256 hashing behind deterministic wallet
//! address derivation.

pub mod hash;

pub use hash::{double_sha256, sha256};
