//! Statistical tests for draw fairness.
//!
//! Win frequencies over many seeded draws are compared against the expected
//! `tickets / total_tickets` shares with a chi-squared goodness-of-fit test.
//! The RNG is seeded, so the outcome is deterministic.

use ball_draw::{draw_winner, DrawConfig, Holder, TicketBook, TokenAmount, UniformTickets};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::HashMap;

const DRAWS: u32 = 100_000;

/// Holders A..D with 1, 2, 3 and 4 tickets respectively.
fn ten_ticket_book() -> TicketBook {
    let holders: Vec<Holder> = [("A", 1), ("B", 2), ("C", 3), ("D", 4)]
        .into_iter()
        .map(|(addr, tickets)| Holder::new(addr, TokenAmount::new(tickets * 10_000, 0)))
        .collect();
    TicketBook::allocate(&holders, 10_000).unwrap()
}

fn tally(book: &TicketBook, config: &DrawConfig, seed: u64) -> HashMap<String, u32> {
    let mut source = UniformTickets::new(ChaCha20Rng::seed_from_u64(seed));
    let mut wins = HashMap::new();
    for _ in 0..DRAWS {
        let result = draw_winner(book, config, &mut source)
            .unwrap()
            .into_winner()
            .unwrap();
        *wins.entry(result.winner.holder.address).or_insert(0) += 1;
    }
    wins
}

/// Chi-squared statistic for observed counts against expected shares.
fn chi_squared(wins: &HashMap<String, u32>, shares: &[(&str, f64)]) -> f64 {
    shares
        .iter()
        .map(|(addr, share)| {
            let expected = share * DRAWS as f64;
            let observed = *wins.get(*addr).unwrap_or(&0) as f64;
            (observed - expected).powi(2) / expected
        })
        .sum()
}

fn critical_value(degrees_of_freedom: f64) -> f64 {
    ChiSquared::new(degrees_of_freedom)
        .unwrap()
        .inverse_cdf(0.9999)
}

#[test]
fn test_win_frequency_matches_ticket_share() {
    let book = ten_ticket_book();
    let wins = tally(&book, &DrawConfig::default(), 2024);

    let shares = [("A", 0.1), ("B", 0.2), ("C", 0.3), ("D", 0.4)];
    let stat = chi_squared(&wins, &shares);

    assert!(
        stat < critical_value(3.0),
        "win frequencies deviate from ticket shares: chi2={stat}, wins={wins:?}"
    );
}

#[test]
fn test_exclusion_preserves_relative_odds() {
    let book = ten_ticket_book();
    let config = DrawConfig {
        excluded_wallet: Some("D".to_string()),
        // 0.4^64 chance of exhausting on any single draw
        max_retries: 64,
    };
    let wins = tally(&book, &config, 7);

    assert!(!wins.contains_key("D"), "excluded wallet won: {wins:?}");

    // Remaining holders keep their 1:2:3 ratio
    let shares = [("A", 1.0 / 6.0), ("B", 2.0 / 6.0), ("C", 3.0 / 6.0)];
    let stat = chi_squared(&wins, &shares);

    assert!(
        stat < critical_value(2.0),
        "exclusion biased the remaining holders: chi2={stat}, wins={wins:?}"
    );
}

#[test]
fn test_every_ticket_is_reachable() {
    let holders = vec![
        Holder::new("A", TokenAmount::new(3, 0)),
        Holder::new("B", TokenAmount::new(2, 0)),
    ];
    let book = TicketBook::allocate(&holders, 1).unwrap();
    let mut source = UniformTickets::new(ChaCha20Rng::seed_from_u64(99));

    let mut seen = [false; 5];
    for _ in 0..1_000 {
        let result = draw_winner(&book, &DrawConfig::default(), &mut source)
            .unwrap()
            .into_winner()
            .unwrap();
        seen[result.winning_ticket as usize] = true;
    }
    assert!(seen.iter().all(|s| *s), "unreached tickets: {seen:?}");
}
