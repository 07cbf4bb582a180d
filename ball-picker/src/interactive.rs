//! Interactive ticket lookup after a draw.

use anyhow::Result;
use ball_draw::TicketBook;
use std::io::{BufRead, Write};

use crate::report::{format_count, ticket_owner_report};

/// Prompt for ticket numbers until the user quits or input ends.
///
/// `q` (any case) quits. A number inside the book prints the owner, anything
/// else prints a hint and keeps asking.
pub fn run_lookup_loop<R: BufRead, W: Write>(
    book: &TicketBook,
    mut input: R,
    mut output: W,
) -> Result<()> {
    if book.is_empty() {
        writeln!(output, "No tickets to look up.")?;
        return Ok(());
    }

    let last = book.total_tickets() - 1;
    writeln!(
        output,
        "\nLook up ticket owners (0 - {}), or 'q' to quit.",
        format_count(last as u128)
    )?;

    let mut line = String::new();
    loop {
        write!(output, "Ticket number: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let entry = line.trim();
        if entry.eq_ignore_ascii_case("q") {
            break;
        }

        match entry.parse::<u64>() {
            Ok(ticket) if ticket <= last => {
                writeln!(output, "{}", ticket_owner_report(book, ticket))?;
            }
            Ok(_) => {
                writeln!(
                    output,
                    "Invalid ticket number. Range: 0 - {}",
                    format_count(last as u128)
                )?;
            }
            Err(_) => {
                writeln!(output, "Please enter a valid number or 'q' to quit")?;
            }
        }
    }

    Ok(())
}
