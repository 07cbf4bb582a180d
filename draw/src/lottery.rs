//! Fair winner selection over a [`TicketBook`].
//!
//! A draw samples one ticket uniformly from `[0, total_tickets)` and resolves
//! it to its owner by binary search. If the owner is the excluded wallet the
//! ticket is discarded and a fresh one is drawn, up to
//! [`DrawConfig::max_retries`] attempts in total.
//!
//! Redrawing (rather than walking forward from the rejected ticket) is plain
//! rejection sampling: conditioned on "not excluded", every remaining holder
//! wins with probability `tickets / (total - excluded_tickets)`.

use rand::Rng;
use tracing::{debug, warn};

use crate::error::DrawError;
use crate::seed::DrawSeed;
use crate::tickets::{TicketBook, TicketRange};

/// Default number of draw attempts before giving up on an exclusion.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Configuration for a single draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawConfig {
    /// Wallet that must never be reported as the winner
    pub excluded_wallet: Option<String>,

    /// Maximum number of tickets drawn, including the first.
    /// Default: 10
    pub max_retries: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            excluded_wallet: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl DrawConfig {
    /// Config excluding `wallet` with the default retry budget.
    pub fn excluding(wallet: impl Into<String>) -> Self {
        Self {
            excluded_wallet: Some(wallet.into()),
            ..Default::default()
        }
    }

    /// Check the retry budget.
    pub fn validate(&self) -> Result<(), DrawError> {
        if self.max_retries == 0 {
            return Err(DrawError::InvalidRetryBudget {
                max_retries: self.max_retries,
            });
        }
        Ok(())
    }

    /// Whether `address` is barred from winning.
    pub fn excludes(&self, address: &str) -> bool {
        self.excluded_wallet.as_deref() == Some(address)
    }
}

/// A source of ticket numbers.
pub trait TicketSource {
    /// Return a ticket uniformly distributed over `[0, total_tickets)`.
    ///
    /// Only called with `total_tickets > 0`.
    fn pick(&mut self, total_tickets: u64) -> u64;
}

impl<T: TicketSource + ?Sized> TicketSource for &mut T {
    fn pick(&mut self, total_tickets: u64) -> u64 {
        (**self).pick(total_tickets)
    }
}

/// Draws tickets from any [`rand::Rng`] without modulo bias.
#[derive(Clone, Debug)]
pub struct UniformTickets<R>(R);

impl<R: Rng> UniformTickets<R> {
    /// Wrap an RNG.
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    /// Unwrap the RNG.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Rng> TicketSource for UniformTickets<R> {
    fn pick(&mut self, total_tickets: u64) -> u64 {
        self.0.gen_range(0..total_tickets)
    }
}

/// A completed draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawResult {
    /// The ticket that won
    pub winning_ticket: u64,
    /// The winner and their ticket range
    pub winner: TicketRange,
    /// Tickets drawn, including the winning one
    pub attempts: u32,
    /// Tickets discarded because they belonged to the excluded wallet
    pub rejected: Vec<u64>,
}

impl DrawResult {
    /// Number of redraws caused by the exclusion.
    pub fn retries(&self) -> u32 {
        self.attempts - 1
    }
}

/// Outcome of a draw that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A winner was selected.
    Winner(DrawResult),
    /// No tickets were issued, so there is nobody to draw.
    NoWinner,
}

impl DrawOutcome {
    /// The draw result, if a winner was selected.
    pub fn winner(&self) -> Option<&DrawResult> {
        match self {
            Self::Winner(result) => Some(result),
            Self::NoWinner => None,
        }
    }

    /// Consume the outcome, returning the draw result if any.
    pub fn into_winner(self) -> Option<DrawResult> {
        match self {
            Self::Winner(result) => Some(result),
            Self::NoWinner => None,
        }
    }
}

/// Draw one winner from `book`.
///
/// # Returns
/// - `Ok(DrawOutcome::NoWinner)` if the book holds no tickets
/// - `Ok(DrawOutcome::Winner(..))` with a non-excluded winner
/// - `Err(DrawError::ExclusionExhausted)` if every attempt hit the excluded
///   wallet
/// - `Err(DrawError::InternalConsistency)` if a drawn ticket has no owner
pub fn draw_winner<S>(
    book: &TicketBook,
    config: &DrawConfig,
    source: &mut S,
) -> Result<DrawOutcome, DrawError>
where
    S: TicketSource + ?Sized,
{
    config.validate()?;

    let total_tickets = book.total_tickets();
    if total_tickets == 0 || book.ranges().is_empty() {
        debug!("No tickets allocated, nothing to draw");
        return Ok(DrawOutcome::NoWinner);
    }

    let mut rejected = Vec::new();

    for attempt in 1..=config.max_retries {
        let ticket = source.pick(total_tickets);
        let range = book
            .locate(ticket)
            .ok_or(DrawError::InternalConsistency {
                ticket,
                total_tickets,
            })?;

        if config.excludes(&range.holder.address) {
            warn!(
                "Ticket #{} belongs to excluded wallet {}, redrawing (attempt {}/{})",
                ticket, range.holder.address, attempt, config.max_retries
            );
            rejected.push(ticket);
            continue;
        }

        debug!(
            "Ticket #{} of {} won by {} after {} attempt(s)",
            ticket, total_tickets, range.holder.address, attempt
        );
        return Ok(DrawOutcome::Winner(DrawResult {
            winning_ticket: ticket,
            winner: range.clone(),
            attempts: attempt,
            rejected,
        }));
    }

    Err(DrawError::ExclusionExhausted {
        wallet: config.excluded_wallet.clone().unwrap_or_default(),
        attempts: config.max_retries,
    })
}

/// Verify a draw result by replaying it with the seed that produced it.
///
/// Returns `true` if the replay selects the same ticket, winner and number
/// of attempts.
pub fn verify_draw(
    book: &TicketBook,
    config: &DrawConfig,
    seed: &DrawSeed,
    result: &DrawResult,
) -> bool {
    match draw_winner(book, config, &mut seed.tickets()) {
        Ok(DrawOutcome::Winner(expected)) => {
            expected.winning_ticket == result.winning_ticket
                && expected.winner == result.winner
                && expected.attempts == result.attempts
        }
        _ => false,
    }
}
