//! Quorum wallet state machine
//!
//! A fixed owner set jointly controls a shared balance and outgoing calls.
//! Any owner may propose an action, owners confirm or revoke, and once the
//! confirmation threshold is reached the action executes exactly once
//! through the injected [`Dispatcher`].
//!
//! Operations are strictly serialized: the external ordering authority
//! admits one call at a time. The only suspension point is the outbound
//! dispatch performed during execution, which may reenter the wallet; every
//! operation's state changes are applied before dispatching so a reentrant
//! call observes a consistent post-transition state.

use chrono::{DateTime, Utc};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::collections::BTreeMap;

use crate::crypto::{double_sha256, sha256};
use crate::dispatch::{Dispatcher, OutboundCall};
use crate::wallet::action::{Action, ActionId};
use crate::wallet::config::{WalletConfig, WalletError};
use crate::wallet::events::{EventRecord, WalletEvent};

/// A quorum-controlled wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuorumWallet {
    /// Deterministic address derived from the configuration
    address: String,
    /// Owner set and threshold (immutable)
    config: WalletConfig,
    /// All proposed actions by id
    actions: BTreeMap<ActionId, Action>,
    /// Next action id to assign
    next_id: ActionId,
    /// Units held by the wallet
    balance: u64,
    /// Append-only event log
    events: Vec<EventRecord>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl QuorumWallet {
    /// Create a new wallet from a validated configuration
    pub fn new(config: WalletConfig) -> Self {
        let address = Self::derive_address(&config);
        log::info!("created {} wallet {}", config.description(), address);

        Self {
            address,
            config,
            actions: BTreeMap::new(),
            next_id: 0,
            balance: 0,
            events: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Derive a P2SH-style address from the configuration
    ///
    /// Address = Base58Check(version || RIPEMD160(SHA256(threshold || sorted owners)))
    fn derive_address(config: &WalletConfig) -> String {
        // Sort owners for a deterministic address
        let mut sorted_owners = config.owners().to_vec();
        sorted_owners.sort();

        let mut preimage = (config.threshold() as u64).to_le_bytes().to_vec();
        for owner in &sorted_owners {
            preimage.extend_from_slice(owner.as_bytes());
        }

        // SHA256 then RIPEMD160 of the preimage
        let sha256_hash = sha256(&preimage);
        let mut ripemd = Ripemd160::new();
        ripemd.update(&sha256_hash);
        let ripemd_hash = ripemd.finalize();

        // P2SH version byte (0x05 -> addresses starting with '3')
        let mut address_bytes = vec![0x05];
        address_bytes.extend_from_slice(&ripemd_hash);

        // Checksum: first 4 bytes of double SHA256
        let checksum = double_sha256(&address_bytes)[..4].to_vec();
        address_bytes.extend_from_slice(&checksum);

        bs58::encode(address_bytes).into_string()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the configuration
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Get the owner identities in canonical order
    pub fn owners(&self) -> &[String] {
        self.config.owners()
    }

    /// Get the confirmation threshold
    pub fn threshold(&self) -> usize {
        self.config.threshold()
    }

    /// Get human-readable description like "2-of-3"
    pub fn description(&self) -> String {
        self.config.description()
    }

    /// Units currently held by the wallet
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// When the wallet was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get an action by id
    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(&id)
    }

    /// All actions in id order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Running count of proposed actions (also the next id to assign)
    pub fn proposed_count(&self) -> u64 {
        self.next_id
    }

    /// Ids of actions matching the given execution states, in id order
    pub fn action_ids(&self, pending: bool, executed: bool) -> Vec<ActionId> {
        self.actions
            .values()
            .filter(|a| if a.executed { executed } else { pending })
            .map(|a| a.id)
            .collect()
    }

    /// Count of actions matching the given execution states
    pub fn action_count(&self, pending: bool, executed: bool) -> usize {
        self.actions
            .values()
            .filter(|a| if a.executed { executed } else { pending })
            .count()
    }

    /// Number of confirmations recorded for an action (0 for unknown ids)
    pub fn confirmation_count(&self, id: ActionId) -> usize {
        self.actions
            .get(&id)
            .map(Action::confirmation_count)
            .unwrap_or(0)
    }

    /// Owners confirming an action, in canonical owner order
    pub fn confirmations(&self, id: ActionId) -> Vec<&str> {
        let Some(action) = self.actions.get(&id) else {
            return Vec::new();
        };
        self.config
            .owners()
            .iter()
            .filter(|owner| action.is_confirmed_by(owner))
            .map(|owner| owner.as_str())
            .collect()
    }

    /// Check whether an action has reached quorum
    ///
    /// Scans owners in canonical order and stops as soon as the running
    /// count reaches the threshold. Returns false for unknown ids.
    pub fn is_confirmed(&self, id: ActionId) -> bool {
        let Some(action) = self.actions.get(&id) else {
            return false;
        };

        let mut count = 0;
        for owner in self.config.owners() {
            if action.is_confirmed_by(owner) {
                count += 1;
                if count == self.config.threshold() {
                    return true;
                }
            }
        }
        false
    }

    /// The event log, oldest first
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    // =========================================================================
    // State Transitions
    // =========================================================================

    /// Receive value into the wallet
    ///
    /// Accepts deposits from anyone; no ledger state changes.
    pub fn deposit(&mut self, sender: &str, amount: u64) {
        self.balance += amount;
        log::info!(
            "wallet {} received {} units from {}",
            self.address,
            amount,
            sender
        );
        self.record_event(WalletEvent::Deposited {
            sender: sender.to_string(),
            amount,
        });
    }

    /// Propose a new action
    ///
    /// The proposer's confirmation is automatic and part of the same
    /// operation, so an unconfirmed proposal is never observable. For a
    /// 1-of-N wallet this means the action executes during `propose`.
    ///
    /// # Errors
    /// Returns `Unauthorized` if the caller is not an owner.
    pub fn propose(
        &mut self,
        caller: &str,
        target: &str,
        value: u64,
        payload: Vec<u8>,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<ActionId, WalletError> {
        if !self.config.is_owner(caller) {
            return Err(WalletError::Unauthorized(caller.to_string()));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.actions
            .insert(id, Action::new(id, target.to_string(), value, payload));

        log::info!(
            "owner {} proposed action {}: {} units to {}",
            caller,
            id,
            value,
            target
        );
        self.record_event(WalletEvent::Proposed { id });

        self.confirm(caller, id, dispatcher)?;
        Ok(id)
    }

    /// Confirm an action
    ///
    /// Recording the confirmation always attempts execution afterwards, so
    /// the confirmation that reaches quorum triggers the outbound call in
    /// the same operation.
    ///
    /// # Errors
    /// Returns `Unauthorized`, `UnknownAction`, `AlreadyExecuted` or
    /// `AlreadyConfirmed`.
    pub fn confirm(
        &mut self,
        caller: &str,
        id: ActionId,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<(), WalletError> {
        if !self.config.is_owner(caller) {
            return Err(WalletError::Unauthorized(caller.to_string()));
        }

        let action = self
            .actions
            .get_mut(&id)
            .ok_or(WalletError::UnknownAction(id))?;

        if action.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }

        if action.is_confirmed_by(caller) {
            return Err(WalletError::AlreadyConfirmed {
                owner: caller.to_string(),
                id,
            });
        }

        action.record_confirmation(caller);
        log::info!(
            "owner {} confirmed action {} ({}/{})",
            caller,
            id,
            self.confirmation_count(id),
            self.config.threshold()
        );
        self.record_event(WalletEvent::Confirmed {
            owner: caller.to_string(),
            id,
        });

        self.try_execute(id, dispatcher);
        Ok(())
    }

    /// Withdraw a previously recorded confirmation
    ///
    /// # Errors
    /// Returns `UnknownAction`, `AlreadyExecuted`, `Unauthorized` or
    /// `NotConfirmed`.
    pub fn revoke(&mut self, caller: &str, id: ActionId) -> Result<(), WalletError> {
        let action = self
            .actions
            .get_mut(&id)
            .ok_or(WalletError::UnknownAction(id))?;

        if action.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }

        if !self.config.is_owner(caller) {
            return Err(WalletError::Unauthorized(caller.to_string()));
        }

        if !action.withdraw_confirmation(caller) {
            return Err(WalletError::NotConfirmed {
                owner: caller.to_string(),
                id,
            });
        }

        log::info!(
            "owner {} revoked confirmation of action {} ({}/{})",
            caller,
            id,
            self.confirmation_count(id),
            self.config.threshold()
        );
        self.record_event(WalletEvent::Revoked {
            owner: caller.to_string(),
            id,
        });
        Ok(())
    }

    /// Attempt to execute an action
    ///
    /// Callable by anyone: quorum, not caller identity, is the
    /// authorization gate. Calling below quorum is a valid no-op.
    ///
    /// # Errors
    /// Returns `UnknownAction` or `AlreadyExecuted`.
    pub fn execute(
        &mut self,
        id: ActionId,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<(), WalletError> {
        let action = self.actions.get(&id).ok_or(WalletError::UnknownAction(id))?;

        if action.executed {
            return Err(WalletError::AlreadyExecuted(id));
        }

        self.try_execute(id, dispatcher);
        Ok(())
    }

    /// Execute an action if it has reached quorum
    ///
    /// The action is marked executed and the balance debited *before* the
    /// outbound call: the target may reenter any public operation and must
    /// observe the action as terminal. On failure both are restored and the
    /// action becomes retryable; the dispatch error is reflected in the
    /// event log, never surfaced to the caller.
    fn try_execute(&mut self, id: ActionId, dispatcher: &mut dyn Dispatcher) {
        if !self.is_confirmed(id) {
            return;
        }

        let call = {
            let Some(action) = self.actions.get_mut(&id) else {
                return;
            };
            action.set_executed(true);
            OutboundCall {
                target: action.target.clone(),
                value: action.value,
                payload: action.payload.clone(),
            }
        };

        if self.balance < call.value {
            log::warn!(
                "action {} failed: balance {} below call value {}",
                id,
                self.balance,
                call.value
            );
            self.revert_execution(id);
            return;
        }
        self.balance -= call.value;

        match dispatcher.dispatch(self, &call) {
            Ok(()) => {
                log::info!(
                    "action {} executed: {} units to {}",
                    id,
                    call.value,
                    call.target
                );
                self.record_event(WalletEvent::Executed { id });
            }
            Err(err) => {
                log::warn!("action {} failed: {}", id, err);
                self.balance += call.value;
                self.revert_execution(id);
            }
        }
    }

    /// Roll back a failed execution attempt, leaving the action retryable
    fn revert_execution(&mut self, id: ActionId) {
        if let Some(action) = self.actions.get_mut(&id) {
            action.set_executed(false);
        }
        self.record_event(WalletEvent::ExecutionFailed { id });
    }

    fn record_event(&mut self, event: WalletEvent) {
        self.events.push(EventRecord::new(event));
    }
}
