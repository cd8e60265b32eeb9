//! CLI commands for the quorum wallet
//!
//! Implements the command handlers behind the `quorum-wallet` binary. The
//! wallet itself is an in-memory state machine, so the commands build one,
//! drive it, and print what happened.

use crate::dispatch::{DispatchError, Dispatcher, LoggingDispatcher, OutboundCall};
use crate::wallet::{QuorumWallet, WalletConfig};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Parse a comma-separated owner list and build a validated config
fn build_config(owners: &str, threshold: usize) -> CliResult<WalletConfig> {
    let owners: Vec<String> = owners
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    Ok(WalletConfig::new(owners, threshold, None)?)
}

/// Print the deterministic address for a wallet configuration
pub fn cmd_address(owners: &str, threshold: usize) -> CliResult<()> {
    let config = build_config(owners, threshold)?;
    let wallet = QuorumWallet::new(config);

    println!("🔑 {} wallet", wallet.description());
    println!("   Owners:  {}", wallet.owners().join(", "));
    println!("   Address: {}", wallet.address());
    Ok(())
}

/// Dispatcher that fails the first `failures` calls, then delegates
struct FlakyDispatcher {
    failures: u32,
    inner: LoggingDispatcher,
}

impl Dispatcher for FlakyDispatcher {
    fn dispatch(
        &mut self,
        wallet: &mut QuorumWallet,
        call: &OutboundCall,
    ) -> Result<(), DispatchError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(DispatchError::Unreachable("simulated outage".to_string()));
        }
        self.inner.dispatch(wallet, call)
    }
}

/// Run a scripted propose/confirm/execute scenario end to end
pub fn cmd_demo(owners: &str, threshold: usize, deposit: u64, fail_first: u32) -> CliResult<()> {
    let config = build_config(owners, threshold)?;
    let owner_list = config.owners().to_vec();
    let mut wallet = QuorumWallet::new(config);
    let mut dispatcher = FlakyDispatcher {
        failures: fail_first,
        inner: LoggingDispatcher::new(),
    };

    println!("🏦 {} wallet {}", wallet.description(), wallet.address());

    wallet.deposit("faucet", deposit);
    println!("💰 Deposited {} units (balance: {})", deposit, wallet.balance());

    let value = deposit / 2;
    let proposer = &owner_list[0];
    let id = wallet.propose(
        proposer,
        "vendor",
        value,
        b"demo payment".to_vec(),
        &mut dispatcher,
    )?;
    let action = wallet.action(id).ok_or("proposed action missing")?;
    println!(
        "📝 {} proposed action {}: {} units to {} (payload 0x{})",
        proposer,
        id,
        value,
        action.target,
        action.payload_hex()
    );

    // Confirm with further owners until the action executes
    for owner in owner_list.iter().skip(1) {
        if wallet.action(id).is_some_and(|a| a.executed) {
            break;
        }
        wallet.confirm(owner, id, &mut dispatcher)?;
        println!(
            "✍️  {} confirmed ({}/{})",
            owner,
            wallet.confirmation_count(id),
            wallet.threshold()
        );
    }

    // Retry speculatively until the dispatch goes through, as any external
    // caller could
    while wallet.is_confirmed(id) && !wallet.action(id).is_some_and(|a| a.executed) {
        println!("🔁 Retrying execution of action {}", id);
        wallet.execute(id, &mut dispatcher)?;
    }

    println!("\n📒 Final state:");
    println!("   Balance:  {}", wallet.balance());
    println!("   Pending:  {:?}", wallet.action_ids(true, false));
    println!("   Executed: {:?}", wallet.action_ids(false, true));
    println!("   Outbound calls delivered: {}", dispatcher.inner.delivered().len());

    println!("\n📜 Event log:");
    println!("{}", serde_json::to_string_pretty(wallet.events())?);
    Ok(())
}
