//! Observable wallet events
//!
//! Every state transition appends an event record for external indexers
//! and auditors. The log is append-only and never truncated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wallet::action::ActionId;

/// Events emitted by wallet state transitions
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum WalletEvent {
    /// The wallet received value
    Deposited { sender: String, amount: u64 },
    /// A new action was proposed
    Proposed { id: ActionId },
    /// An owner confirmed an action
    Confirmed { owner: String, id: ActionId },
    /// An owner withdrew a confirmation
    Revoked { owner: String, id: ActionId },
    /// The outbound call succeeded; the action is terminal
    Executed { id: ActionId },
    /// The outbound call failed; the action may be retried
    ExecutionFailed { id: ActionId },
}

/// An event together with when it was recorded
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: WalletEvent,
    pub at: DateTime<Utc>,
}

impl EventRecord {
    /// Record an event at the current time
    pub(crate) fn new(event: WalletEvent) -> Self {
        Self {
            event,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = WalletEvent::Confirmed {
            owner: "alice".to_string(),
            id: 3,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Confirmed");
        assert_eq!(json["data"]["owner"], "alice");
        assert_eq!(json["data"]["id"], 3);
    }

    #[test]
    fn test_event_roundtrip() {
        let event = WalletEvent::ExecutionFailed { id: 7 };

        let json = serde_json::to_string(&event).unwrap();
        let back: WalletEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
