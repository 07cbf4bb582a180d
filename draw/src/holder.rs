//! Token holders and exact fixed-point balances.

use std::cmp::Ordering;
use std::fmt;

/// An exact token quantity: `raw / 10^decimals` whole tokens.
///
/// Balances are never converted to floating point for ticket arithmetic, so
/// `floor(balance / unit)` is exact for every representable amount.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAmount {
    /// Amount in base units
    pub raw: u64,
    /// Number of decimal places of the mint
    pub decimals: u8,
}

/// `10^decimals` as a `u128`, or `None` if it does not fit.
pub(crate) fn decimal_scale(decimals: u8) -> Option<u128> {
    10u128.checked_pow(decimals as u32)
}

impl TokenAmount {
    /// Create an amount from base units.
    pub const fn new(raw: u64, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// A zero amount.
    pub const fn zero(decimals: u8) -> Self {
        Self { raw: 0, decimals }
    }

    /// Create an amount from a whole number of tokens.
    ///
    /// Returns `None` if the amount does not fit in base units.
    pub fn from_whole(tokens: u64, decimals: u8) -> Option<Self> {
        let raw = (tokens as u128).checked_mul(decimal_scale(decimals)?)?;
        u64::try_from(raw).ok().map(|raw| Self { raw, decimals })
    }

    /// Whether this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Whole tokens, rounded down.
    pub fn whole_tokens(&self) -> u64 {
        match decimal_scale(self.decimals) {
            Some(scale) => (self.raw as u128 / scale) as u64,
            None => 0,
        }
    }

    /// Whether this amount is strictly greater than `tokens` whole tokens.
    pub fn exceeds_whole(&self, tokens: u64) -> bool {
        match decimal_scale(self.decimals).and_then(|s| (tokens as u128).checked_mul(s)) {
            Some(limit) => self.raw as u128 > limit,
            // The ceiling is larger than any u64 amount can be
            None => false,
        }
    }

    /// Lossy conversion for display and statistics.
    pub fn to_f64(&self) -> f64 {
        self.raw as f64 / 10f64.powi(self.decimals as i32)
    }

    /// Add two amounts of the same mint.
    ///
    /// Returns `None` on overflow or if the decimals disagree.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.decimals != other.decimals {
            return None;
        }
        Some(Self {
            raw: self.raw.checked_add(other.raw)?,
            decimals: self.decimals,
        })
    }

    fn rescaled(&self, decimals: u8) -> Option<u128> {
        let shift = decimals.checked_sub(self.decimals)?;
        (self.raw as u128).checked_mul(decimal_scale(shift)?)
    }
}

impl Ord for TokenAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let decimals = self.decimals.max(other.decimals);
        match (self.rescaled(decimals), other.rescaled(decimals)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            // One side always has `decimals` places and rescales by 1
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for TokenAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TokenAmount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TokenAmount {}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(scale) = decimal_scale(self.decimals) else {
            return write!(f, "0");
        };
        let raw = self.raw as u128;
        if self.decimals == 0 {
            return write!(f, "{raw}");
        }
        write!(
            f,
            "{}.{:0width$}",
            raw / scale,
            raw % scale,
            width = self.decimals as usize
        )
    }
}

/// A wallet holding the lottery token.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holder {
    /// Wallet address
    pub address: String,
    /// Token balance; `None` when the ledger reported no amount
    pub balance: Option<TokenAmount>,
}

impl Holder {
    /// Create a holder with a known balance.
    pub fn new(address: impl Into<String>, balance: TokenAmount) -> Self {
        Self {
            address: address.into(),
            balance: Some(balance),
        }
    }

    /// Create a holder whose balance is unknown. It holds no tickets.
    pub fn without_balance(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: None,
        }
    }

    /// The balance, treating an absent balance as zero.
    pub fn balance(&self) -> TokenAmount {
        self.balance.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_fraction() {
        assert_eq!(TokenAmount::new(1_234_005, 6).to_string(), "1.234005");
        assert_eq!(TokenAmount::new(42, 0).to_string(), "42");
        assert_eq!(TokenAmount::new(5, 3).to_string(), "0.005");
    }

    #[test]
    fn test_whole_tokens_rounds_down() {
        assert_eq!(TokenAmount::new(19_999_999, 6).whole_tokens(), 19);
        assert_eq!(TokenAmount::from_whole(7, 9).unwrap().raw, 7_000_000_000);
        assert!(TokenAmount::from_whole(u64::MAX, 6).is_none());
    }

    #[test]
    fn test_ordering_across_decimals() {
        let a = TokenAmount::new(1_500, 3); // 1.5
        let b = TokenAmount::new(15, 1); // 1.5
        let c = TokenAmount::new(2, 0); // 2
        assert_eq!(a, b);
        assert!(c > a);
        assert!(TokenAmount::new(u64::MAX, 0) > TokenAmount::new(u64::MAX, 19));
    }

    #[test]
    fn test_exceeds_whole() {
        let balance = TokenAmount::from_whole(40_000_000, 6).unwrap();
        assert!(!balance.exceeds_whole(40_000_000));
        assert!(TokenAmount::new(balance.raw + 1, 6).exceeds_whole(40_000_000));
        assert!(!TokenAmount::new(u64::MAX, 6).exceeds_whole(u64::MAX));
    }

    #[test]
    fn test_checked_add_requires_same_mint() {
        let a = TokenAmount::new(10, 2);
        assert_eq!(a.checked_add(TokenAmount::new(5, 2)).unwrap().raw, 15);
        assert!(a.checked_add(TokenAmount::new(5, 3)).is_none());
        assert!(TokenAmount::new(u64::MAX, 2).checked_add(a).is_none());
    }

    #[test]
    fn test_absent_balance_is_zero() {
        let holder = Holder::without_balance("wallet");
        assert!(holder.balance().is_zero());
    }
}
