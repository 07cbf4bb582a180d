//! Reproducible draw seeds.
//!
//! A draw seeded with the same [`DrawSeed`] over the same ticket book always
//! selects the same winner. Operators either pass a seed phrase, which is
//! hashed into 32 bytes, or let the picker take one from OS entropy and print
//! it alongside the result.

use std::fmt;
use std::str::FromStr;

use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::error::DrawError;
use crate::lottery::UniformTickets;

/// Domain separator for seed phrases.
const SEED_DOMAIN: &[u8] = b"BALL_LOTTERY_SEED_V1";

/// 32 bytes of seed material for a ChaCha20 ticket source.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawSeed([u8; 32]);

impl DrawSeed {
    /// Use raw seed bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive a seed from an operator-chosen phrase.
    pub fn from_phrase(phrase: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(SEED_DOMAIN);
        hasher.update((phrase.len() as u64).to_le_bytes());
        hasher.update(phrase.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Take a fresh seed from the operating system.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse a seed from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, DrawError> {
        let bytes = hex::decode(s.trim()).map_err(|e| DrawError::InvalidSeed {
            reason: e.to_string(),
        })?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| DrawError::InvalidSeed {
            reason: format!("expected 32 bytes, got {}", v.len()),
        })?;
        Ok(Self(bytes))
    }

    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// A ChaCha20 RNG seeded with these bytes.
    pub fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::from_seed(self.0)
    }

    /// A ticket source driven by [`DrawSeed::rng`].
    pub fn tickets(&self) -> UniformTickets<ChaCha20Rng> {
        UniformTickets::new(self.rng())
    }
}

impl fmt::Display for DrawSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DrawSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DrawSeed({})", self.to_hex())
    }
}

impl FromStr for DrawSeed {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lottery::TicketSource;

    #[test]
    fn test_phrase_is_deterministic() {
        assert_eq!(DrawSeed::from_phrase("draw"), DrawSeed::from_phrase("draw"));
        assert_ne!(DrawSeed::from_phrase("draw"), DrawSeed::from_phrase("draw "));
    }

    #[test]
    fn test_hex_roundtrip() {
        let seed = DrawSeed::from_phrase("hex");
        let parsed: DrawSeed = seed.to_string().parse().unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert!(matches!(
            DrawSeed::from_hex("zz"),
            Err(DrawError::InvalidSeed { .. })
        ));
        let err = DrawSeed::from_hex("abcd").unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes, got 2"));
    }

    #[test]
    fn test_same_seed_same_tickets() {
        let seed = DrawSeed::from_bytes([7u8; 32]);
        let mut a = seed.tickets();
        let mut b = seed.tickets();
        for _ in 0..100 {
            let t = a.pick(1_000);
            assert!(t < 1_000);
            assert_eq!(t, b.pick(1_000));
        }
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(DrawSeed::random(), DrawSeed::random());
    }
}
