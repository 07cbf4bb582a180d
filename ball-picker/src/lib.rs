//! BALL Lottery Picker
//!
//! Fetches the holders of a token, allocates balance-weighted tickets and
//! draws a winner with [`ball_draw`].
//!
//! ## Flow
//!
//! - [`ledger`] fetches token accounts over JSON-RPC, one holder per owner
//! - [`snapshot`] applies the eligibility rules and allocates tickets
//! - [`commands::draw`] draws from a seed and prints the [`report`]
//! - [`interactive`] answers ticket lookups afterwards

pub mod config;
pub mod interactive;
pub mod ledger;
pub mod report;
pub mod snapshot;

pub mod commands;

pub use config::Config;
pub use ledger::LedgerClient;
pub use snapshot::Snapshot;
