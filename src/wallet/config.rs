//! Wallet configuration and error types
//!
//! An owner set and confirmation threshold, fixed at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::action::ActionId;

/// Errors related to quorum wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("not an owner: {0}")]
    Unauthorized(String),
    #[error("unknown action: {0}")]
    UnknownAction(ActionId),
    #[error("action {id} already confirmed by {owner}")]
    AlreadyConfirmed { owner: String, id: ActionId },
    #[error("action {id} not confirmed by {owner}")]
    NotConfirmed { owner: String, id: ActionId },
    #[error("action {0} already executed")]
    AlreadyExecuted(ActionId),
}

/// Configuration for a quorum wallet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletConfig {
    /// All owner identities, in canonical order
    owners: Vec<String>,
    /// Minimum distinct confirmations required (M in M-of-N)
    threshold: usize,
    /// Optional human-readable label
    pub label: Option<String>,
}

impl WalletConfig {
    /// Create a new wallet configuration
    ///
    /// # Arguments
    /// * `owners` - Identities authorized to propose, confirm and revoke (N)
    /// * `threshold` - Confirmations required to execute an action (M)
    /// * `label` - Optional label
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` unless `1 <= threshold <= owners.len()`
    /// and the owner list is non-empty with no duplicates.
    pub fn new(
        owners: Vec<String>,
        threshold: usize,
        label: Option<String>,
    ) -> Result<Self, WalletError> {
        if owners.is_empty() {
            return Err(WalletError::InvalidConfiguration(
                "owner set must not be empty".to_string(),
            ));
        }

        if threshold == 0 {
            return Err(WalletError::InvalidConfiguration(
                "threshold must be at least 1".to_string(),
            ));
        }

        if threshold > owners.len() {
            return Err(WalletError::InvalidConfiguration(format!(
                "threshold {} exceeds owner count {}",
                threshold,
                owners.len()
            )));
        }

        // Check for duplicates
        let mut sorted_owners = owners.clone();
        sorted_owners.sort();
        for i in 1..sorted_owners.len() {
            if sorted_owners[i] == sorted_owners[i - 1] {
                return Err(WalletError::InvalidConfiguration(format!(
                    "duplicate owner: {}",
                    sorted_owners[i]
                )));
            }
        }

        Ok(Self {
            owners,
            threshold,
            label,
        })
    }

    /// Get the owner identities in canonical (construction) order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Get the threshold (M)
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Check if an identity is an owner (exact match)
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owners.iter().any(|o| o == identity)
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.threshold, self.owners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<String> {
        vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
        ]
    }

    #[test]
    fn test_config_creation() {
        let config = WalletConfig::new(sample_owners(), 2, Some("Treasury".to_string())).unwrap();

        assert_eq!(config.threshold(), 2);
        assert_eq!(config.owner_count(), 3);
        assert_eq!(config.description(), "2-of-3");
        assert!(config.label.is_some());
    }

    #[test]
    fn test_config_validation() {
        // Zero threshold
        assert!(WalletConfig::new(sample_owners(), 0, None).is_err());

        // Threshold > owners
        assert!(WalletConfig::new(sample_owners(), 4, None).is_err());

        // Empty owner set
        assert!(WalletConfig::new(vec![], 1, None).is_err());

        // Duplicate owners
        assert!(
            WalletConfig::new(vec!["same".to_string(), "same".to_string()], 1, None).is_err()
        );
    }

    #[test]
    fn test_single_owner_allowed() {
        // A 1-of-1 wallet is legal: the sole owner's proposal executes directly
        let config = WalletConfig::new(vec!["alice".to_string()], 1, None).unwrap();
        assert_eq!(config.description(), "1-of-1");
    }

    #[test]
    fn test_is_owner() {
        let config = WalletConfig::new(sample_owners(), 2, None).unwrap();

        assert!(config.is_owner("alice"));
        assert!(config.is_owner("carol"));
        assert!(!config.is_owner("mallory"));
        assert!(!config.is_owner("Alice"));
    }

    #[test]
    fn test_error_messages() {
        let err = WalletConfig::new(sample_owners(), 5, None).unwrap_err();
        assert!(matches!(err, WalletError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("threshold 5 exceeds owner count 3"));
    }
}
