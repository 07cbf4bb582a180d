//! CLI Commands
//!
//! Implementation of all picker CLI commands.

pub mod draw;
pub mod holders;
pub mod init;
pub mod lookup;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::ledger::LedgerClient;
use crate::snapshot::Snapshot;

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("\x1b[31mError:\x1b[0m {}", message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("\x1b[32m{}\x1b[0m", message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("\x1b[33mWarning:\x1b[0m {}", message);
}

/// Fetch the current holders of the configured mint and allocate tickets.
pub async fn fetch_snapshot(config: &Config) -> Result<Snapshot> {
    config.validate()?;

    let client = LedgerClient::new(&config.rpc_endpoint)?;
    let holders = client
        .fetch_holders(&config.token_mint)
        .await
        .with_context(|| format!("Failed to fetch holders from {}", client.endpoint()))?;

    Snapshot::build(holders, config)
}
