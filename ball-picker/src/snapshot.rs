//! A frozen holder population and its ticket allocation.

use anyhow::{Context, Result};
use ball_draw::{Eligibility, Holder, TicketBook};
use tracing::info;

use crate::config::Config;

/// Holders eligible for one draw, with their tickets allocated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Eligible and excluded holders
    pub eligibility: Eligibility,
    /// Ticket ranges over the eligible holders
    pub book: TicketBook,
}

impl Snapshot {
    /// Apply the configured eligibility rules and allocate tickets.
    pub fn build(holders: Vec<Holder>, config: &Config) -> Result<Self> {
        let eligibility = config.eligibility_rules().apply(holders);
        let book = TicketBook::allocate(&eligibility.eligible, config.ticket_unit)
            .context("Failed to allocate tickets")?;

        info!(
            "{} eligible holders, {} with tickets, {} tickets issued",
            eligibility.eligible.len(),
            book.holder_count(),
            book.total_tickets()
        );

        Ok(Self { eligibility, book })
    }

    /// Eligible holders, largest balance first.
    pub fn holders(&self) -> &[Holder] {
        &self.eligibility.eligible
    }
}
