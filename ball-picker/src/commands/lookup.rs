//! Single ticket lookup command

use anyhow::Result;

use crate::config::Config;
use crate::report::{format_count, ticket_owner_report};

use super::{fetch_snapshot, print_warning};

/// Run the lookup command
pub async fn run(config: &Config, ticket: u64) -> Result<()> {
    let snapshot = fetch_snapshot(config).await?;
    let book = &snapshot.book;

    println!("{}", ticket_owner_report(book, ticket));
    if book.locate(ticket).is_none() {
        if book.is_empty() {
            print_warning("No tickets have been issued");
        } else {
            println!(
                "Valid range: 0 - {}",
                format_count((book.total_tickets() - 1) as u128)
            );
        }
    }

    Ok(())
}
