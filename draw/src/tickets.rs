//! Ticket allocation.
//!
//! Each holder receives `floor(balance / unit)` tickets. Holders with at
//! least one ticket are laid out on a single number line in input order:
//!
//! ```text
//!   holders:  A (3 tickets)   B (2 tickets)   C (0 tickets)
//!   tickets:  0 1 2           3 4
//!   ranges:   A:[0,2]         B:[3,4]         (C has no range)
//! ```
//!
//! The resulting [`TicketBook`] partitions `[0, total_tickets)` exactly: the
//! first range starts at 0, every range begins one past the end of the
//! previous one, and no range is empty.

use crate::error::DrawError;
use crate::holder::{decimal_scale, Holder, TokenAmount};

/// Whole tokens per ticket. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TicketUnit(u64);

impl TicketUnit {
    /// Create a ticket unit, rejecting zero.
    pub fn new(whole_tokens: u64) -> Result<Self, DrawError> {
        if whole_tokens == 0 {
            return Err(DrawError::InvalidTicketUnit { unit: whole_tokens });
        }
        Ok(Self(whole_tokens))
    }

    /// Whole tokens per ticket.
    pub fn whole_tokens(&self) -> u64 {
        self.0
    }

    /// Number of tickets a balance is worth, rounded down.
    pub fn tickets_for(&self, balance: &TokenAmount) -> u64 {
        let divisor = decimal_scale(balance.decimals).and_then(|s| s.checked_mul(self.0 as u128));
        match divisor {
            // raw / divisor <= raw, so the quotient always fits in u64
            Some(divisor) => (balance.raw as u128 / divisor) as u64,
            None => 0,
        }
    }
}

/// A holder's contiguous slice of the ticket number line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicketRange {
    /// Owner of the tickets
    pub holder: Holder,
    /// First ticket number (inclusive)
    pub start: u64,
    /// Last ticket number (inclusive)
    pub end: u64,
}

impl TicketRange {
    /// Number of tickets in this range. Always at least one.
    pub fn tickets(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Whether `ticket` falls inside this range.
    pub fn contains(&self, ticket: u64) -> bool {
        self.start <= ticket && ticket <= self.end
    }

    /// Probability of this range winning a draw over `total_tickets`.
    pub fn win_probability(&self, total_tickets: u64) -> f64 {
        if total_tickets == 0 {
            return 0.0;
        }
        self.tickets() as f64 / total_tickets as f64
    }
}

/// The ordered, gapless ticket ranges for one draw.
#[derive(Clone, Debug)]
pub struct TicketBook {
    unit: TicketUnit,
    ranges: Vec<TicketRange>,
    total_tickets: u64,
}

impl TicketBook {
    /// Allocate tickets to `holders` in the order given.
    ///
    /// Holders whose balance is below one ticket (including absent
    /// balances) are skipped and consume no ticket numbers.
    pub fn allocate<'a, I>(holders: I, ticket_unit: u64) -> Result<Self, DrawError>
    where
        I: IntoIterator<Item = &'a Holder>,
    {
        let unit = TicketUnit::new(ticket_unit)?;
        let mut ranges = Vec::new();
        let mut cursor: u64 = 0;

        for holder in holders {
            let count = unit.tickets_for(&holder.balance());
            if count == 0 {
                continue;
            }

            let next = cursor
                .checked_add(count)
                .ok_or_else(|| DrawError::TicketOverflow {
                    address: holder.address.clone(),
                })?;

            ranges.push(TicketRange {
                holder: holder.clone(),
                start: cursor,
                end: next - 1,
            });
            cursor = next;
        }

        Ok(Self {
            unit,
            ranges,
            total_tickets: cursor,
        })
    }

    /// The ticket unit used for this allocation.
    pub fn unit(&self) -> TicketUnit {
        self.unit
    }

    /// Ranges in ascending ticket order.
    pub fn ranges(&self) -> &[TicketRange] {
        &self.ranges
    }

    /// Number of holders that received at least one ticket.
    pub fn holder_count(&self) -> usize {
        self.ranges.len()
    }

    /// Total tickets issued. Ticket numbers run from 0 to `total - 1`.
    pub fn total_tickets(&self) -> u64 {
        self.total_tickets
    }

    /// Whether no tickets were issued.
    pub fn is_empty(&self) -> bool {
        self.total_tickets == 0
    }

    /// The range owning `ticket`, by binary search.
    ///
    /// Returns `None` for tickets outside `[0, total_tickets)`.
    pub fn locate(&self, ticket: u64) -> Option<&TicketRange> {
        let idx = self.ranges.partition_point(|r| r.end < ticket);
        self.ranges.get(idx).filter(|r| r.contains(ticket))
    }

    /// The holder owning `ticket`, or `None` if no such ticket exists.
    pub fn find_owner(&self, ticket: u64) -> Option<&Holder> {
        self.locate(ticket).map(|r| &r.holder)
    }

    /// The range allocated to `address`, if it holds any tickets.
    pub fn range_of(&self, address: &str) -> Option<&TicketRange> {
        self.ranges.iter().find(|r| r.holder.address == address)
    }

    /// Tickets held by `address`; zero if it holds none.
    pub fn tickets_of(&self, address: &str) -> u64 {
        self.range_of(address).map_or(0, TicketRange::tickets)
    }
}

/// Allocate tickets to `holders` in order. See [`TicketBook::allocate`].
pub fn allocate(holders: &[Holder], ticket_unit: u64) -> Result<TicketBook, DrawError> {
    TicketBook::allocate(holders, ticket_unit)
}

/// The holder owning `ticket`. See [`TicketBook::find_owner`].
pub fn find_owner(book: &TicketBook, ticket: u64) -> Option<&Holder> {
    book.find_owner(ticket)
}
