//! Outbound call dispatch
//!
//! The wallet performs exactly one kind of external side effect: sending
//! value and a payload to a target. The [`Dispatcher`] trait is the injected
//! capability that performs that call. Targets are untrusted and may reenter
//! any wallet operation before returning, which is why implementations
//! receive the wallet handle itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::QuorumWallet;

/// Errors reported by an outbound call
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("target unreachable: {0}")]
    Unreachable(String),
    #[error("call rejected by target: {0}")]
    Rejected(String),
}

/// A single outgoing call: send `value` units and `payload` to `target`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundCall {
    /// Destination identifier
    pub target: String,
    /// Unit amount transferred with the call
    pub value: u64,
    /// Opaque call data
    pub payload: Vec<u8>,
}

/// Capability for performing the wallet's external call
///
/// The target may reenter any public wallet operation before `dispatch`
/// returns. The wallet marks an action executed before dispatching, which
/// is what keeps a reentrant call from executing it twice.
pub trait Dispatcher {
    /// Deliver `call` on behalf of `wallet`, reporting success or failure
    fn dispatch(
        &mut self,
        wallet: &mut QuorumWallet,
        call: &OutboundCall,
    ) -> Result<(), DispatchError>;
}

/// Dispatcher that accepts every call and keeps a record of deliveries
#[derive(Debug, Default)]
pub struct LoggingDispatcher {
    delivered: Vec<OutboundCall>,
}

impl LoggingDispatcher {
    /// Create a new dispatcher with an empty delivery record
    pub fn new() -> Self {
        Self {
            delivered: Vec::new(),
        }
    }

    /// Calls delivered so far, in order
    pub fn delivered(&self) -> &[OutboundCall] {
        &self.delivered
    }
}

impl Dispatcher for LoggingDispatcher {
    fn dispatch(
        &mut self,
        wallet: &mut QuorumWallet,
        call: &OutboundCall,
    ) -> Result<(), DispatchError> {
        log::info!(
            "wallet {} sent {} units to {} (payload: {})",
            wallet.address(),
            call.value,
            call.target,
            hex::encode(&call.payload)
        );
        self.delivered.push(call.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletConfig;

    #[test]
    fn test_logging_dispatcher_records_deliveries() {
        let config = WalletConfig::new(vec!["alice".to_string()], 1, None).unwrap();
        let mut wallet = QuorumWallet::new(config);
        let mut dispatcher = LoggingDispatcher::new();

        let call = OutboundCall {
            target: "vendor".to_string(),
            value: 10,
            payload: vec![0xAA],
        };

        dispatcher.dispatch(&mut wallet, &call).unwrap();
        dispatcher.dispatch(&mut wallet, &call).unwrap();

        assert_eq!(dispatcher.delivered().len(), 2);
        assert_eq!(dispatcher.delivered()[0], call);
    }
}
