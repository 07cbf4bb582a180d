//! Errors produced by ticket allocation and drawing.

use thiserror::Error;

/// Errors that can occur while allocating tickets or drawing a winner.
///
/// A draw with no tickets at all is not an error; it is reported as
/// [`DrawOutcome::NoWinner`](crate::DrawOutcome::NoWinner).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The ticket unit must be a positive number of whole tokens.
    #[error("invalid ticket unit {unit}: tokens per ticket must be positive")]
    InvalidTicketUnit {
        /// The rejected unit
        unit: u64,
    },

    /// At least one draw attempt is required.
    #[error("invalid retry budget {max_retries}: at least one draw attempt is required")]
    InvalidRetryBudget {
        /// The rejected budget
        max_retries: u32,
    },

    /// The running ticket total no longer fits in a `u64`.
    #[error("ticket total overflowed while allocating tickets for {address}")]
    TicketOverflow {
        /// Holder whose tickets caused the overflow
        address: String,
    },

    /// Every attempt landed on the excluded wallet.
    #[error("excluded wallet {wallet} was drawn on all {attempts} attempts, no eligible winner")]
    ExclusionExhausted {
        /// The excluded wallet
        wallet: String,
        /// Number of tickets drawn before giving up
        attempts: u32,
    },

    /// A drawn ticket has no owning range.
    ///
    /// Allocation guarantees a gapless partition, so this indicates a broken
    /// ticket book or a ticket source returning values out of range.
    #[error("ticket {ticket} has no owner among {total_tickets} allocated tickets")]
    InternalConsistency {
        /// The orphaned ticket
        ticket: u64,
        /// Total tickets in the book
        total_tickets: u64,
    },

    /// A draw seed could not be parsed.
    #[error("invalid draw seed: {reason}")]
    InvalidSeed {
        /// What was wrong with the input
        reason: String,
    },
}

impl DrawError {
    /// Whether this error stems from bad configuration rather than the draw.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidTicketUnit { .. } | Self::InvalidRetryBudget { .. } | Self::InvalidSeed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_message_names_wallet_and_attempts() {
        let err = DrawError::ExclusionExhausted {
            wallet: "LpWallet111".to_string(),
            attempts: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("LpWallet111"));
        assert!(msg.contains("10 attempts"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_errors() {
        assert!(DrawError::InvalidTicketUnit { unit: 0 }.is_configuration());
        assert!(DrawError::InvalidRetryBudget { max_retries: 0 }.is_configuration());
        assert!(!DrawError::InternalConsistency {
            ticket: 5,
            total_tickets: 5
        }
        .is_configuration());
    }
}
