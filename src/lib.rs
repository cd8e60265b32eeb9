//! Quorum Wallet: an M-of-N authorization engine in Rust
//!
//! This crate provides a quorum-based authorization state machine:
//! - Fixed owner sets with a confirmation threshold (M-of-N)
//! - Action proposal with automatic proposer confirmation
//! - Per-owner confirmation and revocation bookkeeping
//! - Short-circuit quorum evaluation in canonical owner order
//! - Execute-once semantics with failure containment and retry
//! - Injected outbound dispatch, safe against reentrant targets
//! - Append-only event log for external indexers
//! - Deterministic P2SH-style wallet addresses
//!
//! # Example
//!
//! ```rust
//! use quorum_wallet::dispatch::LoggingDispatcher;
//! use quorum_wallet::wallet::{QuorumWallet, WalletConfig};
//!
//! // Create a 2-of-3 quorum wallet
//! let config = WalletConfig::new(
//!     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
//!     2,
//!     None,
//! )
//! .unwrap();
//! let mut wallet = QuorumWallet::new(config);
//! let mut dispatcher = LoggingDispatcher::new();
//!
//! // Fund the wallet and propose an outgoing payment
//! wallet.deposit("faucet", 100);
//! let id = wallet
//!     .propose("alice", "vendor", 40, vec![], &mut dispatcher)
//!     .unwrap();
//!
//! // The second confirmation reaches quorum and executes the action
//! wallet.confirm("bob", id, &mut dispatcher).unwrap();
//! assert!(wallet.action(id).unwrap().executed);
//! assert_eq!(wallet.balance(), 60);
//! ```

pub mod cli;
pub mod crypto;
pub mod dispatch;
pub mod wallet;

// Re-export commonly used types
pub use dispatch::{DispatchError, Dispatcher, LoggingDispatcher, OutboundCall};
pub use wallet::{
    Action, ActionId, EventRecord, QuorumWallet, WalletConfig, WalletError, WalletEvent,
};
