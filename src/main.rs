//! Quorum Wallet CLI Application
//!
//! A command-line interface for exercising the quorum wallet state machine.

use clap::{Parser, Subcommand};
use quorum_wallet::cli;

#[derive(Parser)]
#[command(name = "quorum-wallet")]
#[command(version = "0.1.0")]
#[command(about = "An M-of-N quorum wallet state machine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the wallet address for an owner set and threshold
    Address {
        /// Comma-separated owner identities
        #[arg(short, long)]
        owners: String,

        /// Confirmations required to execute an action
        #[arg(short, long)]
        threshold: usize,
    },

    /// Run a scripted propose/confirm/execute scenario
    Demo {
        /// Comma-separated owner identities
        #[arg(short, long, default_value = "alice,bob,carol")]
        owners: String,

        /// Confirmations required to execute an action
        #[arg(short, long, default_value = "2")]
        threshold: usize,

        /// Units deposited before the proposal
        #[arg(short, long, default_value = "100")]
        deposit: u64,

        /// Number of dispatch attempts that fail before one succeeds
        #[arg(long, default_value = "0")]
        fail_first: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Address { owners, threshold } => cli::cmd_address(&owners, threshold),
        Commands::Demo {
            owners,
            threshold,
            deposit,
            fail_first,
        } => cli::cmd_demo(&owners, threshold, deposit, fail_first),
    }
}
