//! Balance-weighted lottery draws for token holders.
//!
//! Every holder receives one ticket per `ticket_unit` whole tokens held.
//! Tickets are numbered on a single gapless line, one uniformly random ticket
//! is drawn, and its owner wins.
//!
//! ## Pipeline
//!
//! | Step        | Type / function                      | Notes                                  |
//! |-------------|--------------------------------------|----------------------------------------|
//! | Filter      | [`EligibilityRules::apply`]          | Listed wallets, balance ceiling        |
//! | Allocate    | [`TicketBook::allocate`]             | `floor(balance / unit)` tickets each   |
//! | Draw        | [`draw_winner`]                      | Bounded redraws on the excluded wallet |
//! | Look up     | [`TicketBook::find_owner`]           | Binary search, `None` when out of range|
//! | Verify      | [`verify_draw`]                      | Replays a seeded draw                  |
//!
//! ## Example
//!
//! ```
//! use ball_draw::{draw_winner, DrawConfig, DrawSeed, Holder, TicketBook, TokenAmount};
//!
//! let holders = vec![
//!     Holder::new("A", TokenAmount::from_whole(30_000, 6).unwrap()),
//!     Holder::new("B", TokenAmount::from_whole(20_000, 6).unwrap()),
//! ];
//! let book = TicketBook::allocate(&holders, 10_000).unwrap();
//! assert_eq!(book.total_tickets(), 5);
//!
//! let config = DrawConfig {
//!     excluded_wallet: Some("A".to_string()),
//!     max_retries: 64,
//! };
//! let seed = DrawSeed::from_phrase("example");
//! let outcome = draw_winner(&book, &config, &mut seed.tickets()).unwrap();
//! assert_eq!(outcome.winner().unwrap().winner.holder.address, "B");
//! ```

pub mod eligibility;
pub mod error;
pub mod lottery;
pub mod seed;

mod holder;
mod tickets;

pub use eligibility::{sort_by_balance, Eligibility, EligibilityRules, ExclusionReason};
pub use error::DrawError;
pub use holder::{Holder, TokenAmount};
pub use lottery::{
    draw_winner, verify_draw, DrawConfig, DrawOutcome, DrawResult, TicketSource, UniformTickets,
    DEFAULT_MAX_RETRIES,
};
pub use seed::DrawSeed;
pub use tickets::{allocate, find_owner, TicketBook, TicketRange, TicketUnit};
