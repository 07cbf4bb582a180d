//! Pre-draw population filtering.
//!
//! These rules remove holders from the lottery entirely, before tickets are
//! allocated. They are separate from [`DrawConfig::excluded_wallet`], which
//! is a last-line check applied to each drawn ticket.
//!
//! [`DrawConfig::excluded_wallet`]: crate::DrawConfig::excluded_wallet

use std::collections::HashSet;

use tracing::debug;

use crate::holder::Holder;

/// Why a holder was removed from the population.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Balance is zero or unknown.
    EmptyBalance,
    /// Address is on the configured exclusion list (e.g. a liquidity pool).
    ListedWallet,
    /// Balance is above the configured ceiling.
    AboveBalanceCeiling,
}

impl ExclusionReason {
    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyBalance => "empty balance",
            Self::ListedWallet => "excluded wallet",
            Self::AboveBalanceCeiling => "above balance ceiling",
        }
    }
}

/// Rules deciding who may enter the draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EligibilityRules {
    /// Wallets that never take part (liquidity pools, treasuries, ...)
    pub excluded_wallets: Vec<String>,

    /// Holders with more than this many whole tokens are removed
    pub max_balance: Option<u64>,
}

/// Result of applying [`EligibilityRules`].
#[derive(Clone, Debug, Default)]
pub struct Eligibility {
    /// Eligible holders, largest balance first, ties broken by address
    pub eligible: Vec<Holder>,
    /// Removed holders and why
    pub excluded: Vec<(Holder, ExclusionReason)>,
}

impl EligibilityRules {
    /// Check a single holder.
    pub fn check(&self, holder: &Holder) -> Result<(), ExclusionReason> {
        let balance = holder.balance();
        if balance.is_zero() {
            return Err(ExclusionReason::EmptyBalance);
        }
        if self.excluded_wallets.iter().any(|w| *w == holder.address) {
            return Err(ExclusionReason::ListedWallet);
        }
        if let Some(ceiling) = self.max_balance {
            if balance.exceeds_whole(ceiling) {
                return Err(ExclusionReason::AboveBalanceCeiling);
            }
        }
        Ok(())
    }

    /// Split `holders` into eligible and excluded sets.
    pub fn apply(&self, holders: impl IntoIterator<Item = Holder>) -> Eligibility {
        let mut result = Eligibility::default();

        for holder in holders {
            match self.check(&holder) {
                Ok(()) => result.eligible.push(holder),
                Err(reason) => {
                    debug!("Excluding {} ({})", holder.address, reason.label());
                    result.excluded.push((holder, reason));
                }
            }
        }

        sort_by_balance(&mut result.eligible);
        result
    }
}

impl Eligibility {
    /// Addresses removed for `reason`, deduplicated.
    pub fn excluded_for(&self, reason: ExclusionReason) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.excluded
            .iter()
            .filter(|(_, r)| *r == reason)
            .map(|(h, _)| h.address.as_str())
            .filter(|a| seen.insert(*a))
            .collect()
    }
}

/// Sort holders by descending balance, then ascending address.
pub fn sort_by_balance(holders: &mut [Holder]) {
    holders.sort_by(|a, b| {
        b.balance()
            .cmp(&a.balance())
            .then_with(|| a.address.cmp(&b.address))
    });
}
