//! Quorum wallet state machine
//!
//! Provides M-of-N quorum wallets where `threshold` confirmations from a
//! fixed owner set are required before a proposed action executes.
//!
//! # Example
//!
//! ```ignore
//! use quorum_wallet::wallet::{QuorumWallet, WalletConfig};
//!
//! // Create a 2-of-3 quorum wallet
//! let config = WalletConfig::new(owners, 2, None)?;
//! let mut wallet = QuorumWallet::new(config);
//!
//! // Propose an action (the proposer's confirmation is automatic)
//! let id = wallet.propose("alice", "vendor", 100, payload, &mut dispatcher)?;
//!
//! // The confirmation that reaches quorum executes the action
//! wallet.confirm("bob", id, &mut dispatcher)?;
//! ```

pub mod action;
pub mod config;
pub mod events;
pub mod wallet;

pub use action::{Action, ActionId};
pub use config::{WalletConfig, WalletError};
pub use events::{EventRecord, WalletEvent};
pub use wallet::QuorumWallet;
