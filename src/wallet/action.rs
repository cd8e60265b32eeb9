//! Proposed actions and their confirmation bookkeeping
//!
//! An action is an outgoing call awaiting enough owner confirmations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a proposed action
///
/// Ids are dense, start at 0, are assigned in proposal order and never
/// reused.
pub type ActionId = u64;

/// A proposed outgoing operation awaiting confirmations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Action {
    /// Action id
    pub id: ActionId,
    /// Destination identifier
    pub target: String,
    /// Unit amount transferred on execution
    pub value: u64,
    /// Opaque call data
    pub payload: Vec<u8>,
    /// Whether the outbound call has completed successfully
    pub executed: bool,
    /// Owners currently confirming this action, in confirmation order
    confirmed_by: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// When confirmations or execution state last changed
    pub updated_at: DateTime<Utc>,
}

impl Action {
    /// Create a new unconfirmed action
    pub(crate) fn new(id: ActionId, target: String, value: u64, payload: Vec<u8>) -> Self {
        let now = Utc::now();
        Self {
            id,
            target,
            value,
            payload,
            executed: false,
            confirmed_by: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `owner` currently confirms this action
    pub fn is_confirmed_by(&self, owner: &str) -> bool {
        self.confirmed_by.iter().any(|o| o == owner)
    }

    /// Number of recorded confirmations
    pub fn confirmation_count(&self) -> usize {
        self.confirmed_by.len()
    }

    /// Owners confirming this action, in the order they confirmed
    pub fn confirmed_by(&self) -> &[String] {
        &self.confirmed_by
    }

    /// Payload rendered as hex
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    /// Record `owner`'s confirmation
    ///
    /// The wallet checks authorization and duplicates before calling this.
    pub(crate) fn record_confirmation(&mut self, owner: &str) {
        self.confirmed_by.push(owner.to_string());
        self.updated_at = Utc::now();
    }

    /// Withdraw `owner`'s confirmation, returning whether one was recorded
    pub(crate) fn withdraw_confirmation(&mut self, owner: &str) -> bool {
        match self.confirmed_by.iter().position(|o| o == owner) {
            Some(index) => {
                self.confirmed_by.remove(index);
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_executed(&mut self, executed: bool) {
        self.executed = executed;
        self.updated_at = Utc::now();
    }
}
