//! Plain-text rendering of holder summaries and draw results.
//!
//! Every function here returns a `String`; printing is left to the commands.

use ball_draw::{DrawResult, DrawSeed, ExclusionReason, TicketBook, TokenAmount};

use crate::snapshot::Snapshot;

/// Block explorer account URL prefix
pub const EXPLORER_URL: &str = "https://solscan.io/account/";

const RULE_WIDTH: usize = 80;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Shorten an address to `first8...last8`.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 19 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}...{tail}")
}

/// Format an integer with thousands separators.
pub fn format_count(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format `raw / 10^decimals` with separators, truncated to `places` decimals.
pub fn format_raw(raw: u128, decimals: u8, places: u8) -> String {
    let Some(scale) = 10u128.checked_pow(decimals as u32) else {
        return "0".to_string();
    };
    let whole = format_count(raw / scale);
    if places == 0 {
        return whole;
    }

    let frac = raw % scale;
    let frac = if decimals >= places {
        frac / 10u128.pow((decimals - places) as u32)
    } else {
        frac * 10u128.pow((places - decimals) as u32)
    };
    format!("{whole}.{frac:0width$}", width = places as usize)
}

/// Format a token amount with separators, truncated to `places` decimals.
pub fn format_tokens(amount: &TokenAmount, places: u8) -> String {
    format_raw(amount.raw as u128, amount.decimals, places)
}

fn reason_summary(snapshot: &Snapshot) -> Option<String> {
    let parts: Vec<String> = [
        ExclusionReason::ListedWallet,
        ExclusionReason::AboveBalanceCeiling,
        ExclusionReason::EmptyBalance,
    ]
    .into_iter()
    .filter_map(|reason| {
        let count = snapshot.eligibility.excluded_for(reason).len();
        (count > 0).then(|| format!("{count} {}", reason.label()))
    })
    .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Holder summary with a ranked table of the top `limit` holders.
pub fn holder_summary(snapshot: &Snapshot, limit: usize) -> String {
    let holders = snapshot.holders();
    let book = &snapshot.book;
    let unit = book.unit();

    let decimals = holders.first().map_or(0, |h| h.balance().decimals);
    let total_raw: u128 = holders.iter().map(|h| h.balance().raw as u128).sum();

    let mut lines = vec![
        String::new(),
        heavy_rule(),
        "TOKEN HOLDER SUMMARY".to_string(),
        heavy_rule(),
        format!("Eligible Holders: {}", format_count(holders.len() as u128)),
        format!(
            "Holders with Tickets: {}",
            format_count(book.holder_count() as u128)
        ),
        format!(
            "Total Tokens (Eligible): {}",
            format_raw(total_raw, decimals, 2)
        ),
        format!(
            "Total Tickets: {}",
            format_count(book.total_tickets() as u128)
        ),
        format!(
            "Tokens per Ticket: {}",
            format_count(unit.whole_tokens() as u128)
        ),
    ];
    if let Some(reasons) = reason_summary(snapshot) {
        lines.push(format!("Excluded: {reasons}"));
    }

    let shown = limit.min(holders.len());
    lines.push(String::new());
    lines.push(format!("Top {shown} Eligible Holders:"));
    lines.push(format!(
        "{:<6} {:<45} {:>15} {:>10}",
        "Rank", "Wallet", "Balance", "Tickets"
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for (i, holder) in holders.iter().take(shown).enumerate() {
        let balance = holder.balance();
        lines.push(format!(
            "{:<6} {:<45} {:>15} {:>10}",
            i + 1,
            short_address(&holder.address),
            format_tokens(&balance, 0),
            format_count(unit.tickets_for(&balance) as u128)
        ));
    }

    if holders.len() > shown {
        lines.push(format!("... and {} more holders", holders.len() - shown));
    }

    lines.join("\n")
}

/// Participant count and largest participant, shown before the draw.
pub fn participants_report(book: &TicketBook) -> String {
    let mut lines = vec![format!(
        "Lottery participants: {} wallets",
        format_count(book.holder_count() as u128)
    )];
    if let Some(first) = book.ranges().first() {
        lines.push(format!(
            "Largest participant: {} ({} tokens)",
            short_address(&first.holder.address),
            format_tokens(&first.holder.balance(), 0)
        ));
    }
    lines.join("\n")
}

/// Report for a successful draw.
pub fn draw_report(result: &DrawResult, total_tickets: u64, seed: &DrawSeed) -> String {
    let winner = &result.winner;
    let address = &winner.holder.address;

    let mut lines = vec![
        "WINNER SELECTED!".to_string(),
        format!(
            "Winning Ticket: #{}",
            format_count(result.winning_ticket as u128)
        ),
        format!("Winner Wallet: {address}"),
        format!(
            "Winner Balance: {} tokens",
            format_tokens(&winner.holder.balance(), 2)
        ),
        format!("Winner Tickets: {}", format_count(winner.tickets() as u128)),
        format!(
            "Ticket Range: #{} - #{}",
            format_count(winner.start as u128),
            format_count(winner.end as u128)
        ),
        format!(
            "Win Probability: {:.4}%",
            winner.win_probability(total_tickets) * 100.0
        ),
    ];

    if result.rejected.is_empty() {
        lines.push(format!("Attempts: {}", result.attempts));
    } else {
        let rejected: Vec<String> = result
            .rejected
            .iter()
            .map(|t| format!("#{}", format_count(*t as u128)))
            .collect();
        lines.push(format!(
            "Attempts: {} (redrawn, excluded wallet held: {})",
            result.attempts,
            rejected.join(", ")
        ));
    }

    lines.push(format!("Draw Seed: {seed}"));
    lines.push(String::new());
    lines.push("View wallet on Solscan:".to_string());
    lines.push(format!("{EXPLORER_URL}{address}"));
    lines.join("\n")
}

/// Report for a draw with no tickets issued.
pub fn no_winner_report() -> String {
    "No winner could be selected (no valid tickets)".to_string()
}

/// Who owns `ticket`.
pub fn ticket_owner_report(book: &TicketBook, ticket: u64) -> String {
    match book.locate(ticket) {
        Some(range) => format!(
            "Ticket #{} belongs to: {}\nTicket range: #{} - #{}",
            ticket, range.holder.address, range.start, range.end
        ),
        None => format!("Ticket #{ticket} not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ball_draw::Holder;

    fn snapshot() -> Snapshot {
        let config = Config {
            token_mint: "mint".to_string(),
            excluded_wallets: vec!["LpWallet1111111111111111111111111".to_string()],
            ..Default::default()
        };
        let holders = vec![
            Holder::new(
                "AAAAAAAAbbbbbbbbbbbbbbbbbbbbbbbbZZZZZZZZ",
                TokenAmount::from_whole(30_000, 6).unwrap(),
            ),
            Holder::new("B", TokenAmount::new(20_000_500_000, 6)),
            Holder::new("C", TokenAmount::from_whole(9_999, 6).unwrap()),
            Holder::new(
                "LpWallet1111111111111111111111111",
                TokenAmount::from_whole(1, 6).unwrap(),
            ),
        ];
        Snapshot::build(holders, &config).unwrap()
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("AAAAAAAAbbbbbbbbbbbbbbbbbbbbbbbbZZZZZZZZ"),
            "AAAAAAAA...ZZZZZZZZ"
        );
        assert_eq!(short_address("short"), "short");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(40_000_000), "40,000,000");
    }

    #[test]
    fn test_format_raw_truncates() {
        assert_eq!(format_raw(1_234_567_891, 6, 2), "1,234.56");
        assert_eq!(format_raw(1_234_567_891, 6, 0), "1,234");
        assert_eq!(format_raw(5, 0, 2), "5.00");
        assert_eq!(format_raw(5, 1, 3), "0.500");
    }

    #[test]
    fn test_holder_summary() {
        let summary = holder_summary(&snapshot(), 2);
        assert!(summary.contains("Eligible Holders: 3"));
        assert!(summary.contains("Holders with Tickets: 2"));
        assert!(summary.contains("Total Tokens (Eligible): 59,999.50"));
        assert!(summary.contains("Total Tickets: 5"));
        assert!(summary.contains("Tokens per Ticket: 10,000"));
        assert!(summary.contains("Excluded: 1 excluded wallet"));
        assert!(summary.contains("AAAAAAAA...ZZZZZZZZ"));
        assert!(summary.contains("... and 1 more holders"));
        assert!(!summary.contains("LpWallet"));
    }

    #[test]
    fn test_draw_report() {
        let snapshot = snapshot();
        let seed = DrawSeed::from_bytes([0xab; 32]);
        let result = DrawResult {
            winning_ticket: 4,
            winner: snapshot.book.locate(4).unwrap().clone(),
            attempts: 2,
            rejected: vec![1],
        };
        let report = draw_report(&result, snapshot.book.total_tickets(), &seed);
        assert!(report.contains("Winning Ticket: #4"));
        assert!(report.contains("Winner Wallet: B"));
        assert!(report.contains("Winner Balance: 20,000.50 tokens"));
        assert!(report.contains("Ticket Range: #3 - #4"));
        assert!(report.contains("Win Probability: 40.0000%"));
        assert!(report.contains("Attempts: 2 (redrawn, excluded wallet held: #1)"));
        assert!(report.contains(&"ab".repeat(32)));
        assert!(report.contains("https://solscan.io/account/B"));
    }

    #[test]
    fn test_ticket_owner_report() {
        let snapshot = snapshot();
        let found = ticket_owner_report(&snapshot.book, 3);
        assert!(found.contains("Ticket #3 belongs to: B"));
        assert!(found.contains("Ticket range: #3 - #4"));
        assert_eq!(ticket_owner_report(&snapshot.book, 5), "Ticket #5 not found");
    }

    #[test]
    fn test_participants_report() {
        let report = participants_report(&snapshot().book);
        assert!(report.contains("Lottery participants: 2 wallets"));
        assert!(report.contains("AAAAAAAA...ZZZZZZZZ (30,000 tokens)"));
    }
}
