//! Lottery draw command

use anyhow::{bail, Context, Result};
use ball_draw::{draw_winner, verify_draw, DrawError, DrawOutcome, DrawSeed};
use std::io;
use tracing::{debug, info};

use crate::config::Config;
use crate::interactive::run_lookup_loop;
use crate::report::{draw_report, holder_summary, no_winner_report, participants_report};

use super::{fetch_snapshot, print_error, print_warning};

/// Where the draw seed comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Fresh seed from the operating system
    Random,
    /// Seed derived from a public phrase
    Phrase(String),
    /// Seed given as 64 hex characters
    Hex(String),
}

impl SeedSource {
    /// Pick the seed source from the `--seed` / `--seed-hex` flags.
    pub fn from_flags(phrase: Option<String>, hex: Option<String>) -> Self {
        match (phrase, hex) {
            (Some(phrase), _) => Self::Phrase(phrase),
            (None, Some(hex)) => Self::Hex(hex),
            (None, None) => Self::Random,
        }
    }

    pub fn resolve(&self) -> Result<DrawSeed> {
        Ok(match self {
            Self::Random => DrawSeed::random(),
            Self::Phrase(phrase) => DrawSeed::from_phrase(phrase),
            Self::Hex(hex) => DrawSeed::from_hex(hex).context("Invalid --seed-hex")?,
        })
    }
}

/// Run the draw command
pub async fn run(config: &Config, seed: SeedSource, interactive: bool) -> Result<()> {
    let seed = seed.resolve()?;
    let draw_config = config.draw_config();

    let snapshot = fetch_snapshot(config).await?;
    println!("{}", holder_summary(&snapshot, config.display_limit));

    let book = &snapshot.book;
    println!();
    println!("{}", participants_report(book));
    info!("Drawing with seed {}", seed);

    let result = match draw_winner(book, &draw_config, &mut seed.tickets()) {
        Ok(DrawOutcome::Winner(result)) => result,
        Ok(DrawOutcome::NoWinner) => {
            print_warning(&no_winner_report());
            return Ok(());
        }
        Err(e @ DrawError::ExclusionExhausted { .. }) => {
            print_error(&e.to_string());
            return Err(e.into());
        }
        Err(e) => return Err(e).context("Draw failed"),
    };

    if !verify_draw(book, &draw_config, &seed, &result) {
        bail!("Draw did not replay from seed {}", seed);
    }
    debug!("Draw replayed from seed");

    println!();
    println!("{}", draw_report(&result, book.total_tickets(), &seed));

    if interactive {
        run_lookup_loop(book, io::stdin().lock(), io::stdout().lock())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_flags() {
        assert_eq!(SeedSource::from_flags(None, None), SeedSource::Random);
        assert_eq!(
            SeedSource::from_flags(Some("block 123".into()), None),
            SeedSource::Phrase("block 123".into())
        );
        assert_eq!(
            SeedSource::from_flags(None, Some("00".into())),
            SeedSource::Hex("00".into())
        );
    }

    #[test]
    fn test_resolve_seed() {
        let phrase = SeedSource::Phrase("draw #1".into()).resolve().unwrap();
        assert_eq!(phrase, DrawSeed::from_phrase("draw #1"));

        let hex = SeedSource::Hex("11".repeat(32)).resolve().unwrap();
        assert_eq!(hex.as_bytes(), &[0x11; 32]);

        assert!(SeedSource::Hex("zz".into()).resolve().is_err());
    }
}
