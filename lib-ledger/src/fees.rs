//! Transfer fee computation.
//!
//! A [`FeeTable`] is an ordered list of (recipient, rate) splits in basis
//! points. Fee computation is a **pure function** over (amount, table):
//! every share is `floor(amount * rate / 10_000)` and the net remainder is
//! `amount - sum(shares)`, so shares plus remainder always reconstruct the
//! gross amount exactly. No value is created or destroyed by rounding.

use lib_types::{share_of_bps, Address, Amount, Bps, BPS_DENOM};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// A single fee split: recipient and rate in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Account credited with this share
    pub recipient: Address,
    /// Rate in basis points (10000 = 100%)
    pub rate_bps: Bps,
}

/// Ordered transfer-fee schedule
///
/// Construction validates that the rates sum to at most `max_total_bps`,
/// which itself never exceeds 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTable {
    splits: Vec<FeeSplit>,
    max_total_bps: Bps,
}

/// Result of a fee computation over a gross amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// Per-recipient shares in table order
    pub shares: Vec<(Address, Amount)>,
    /// Sum of all shares
    pub fee_total: Amount,
    /// Remainder credited to the transfer recipient
    pub net: Amount,
}

impl FeeTable {
    /// Create a fee table, validating rates against the cap.
    pub fn new(splits: Vec<FeeSplit>, max_total_bps: Bps) -> LedgerResult<Self> {
        if max_total_bps as Amount > BPS_DENOM {
            return Err(LedgerError::InvalidConfig(
                "fee cap exceeds 100%".to_string(),
            ));
        }
        let total: u64 = splits.iter().map(|s| s.rate_bps as u64).sum();
        if total > max_total_bps as u64 {
            return Err(LedgerError::InvalidConfig(format!(
                "fee rates sum to {} bps, cap is {} bps",
                total, max_total_bps
            )));
        }
        for split in &splits {
            if split.recipient.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
        }
        Ok(Self {
            splits,
            max_total_bps,
        })
    }

    /// A table with a single recipient, capped at exactly its own rate.
    pub fn flat(recipient: Address, rate_bps: Bps) -> LedgerResult<Self> {
        Self::new(
            vec![FeeSplit {
                recipient,
                rate_bps,
            }],
            rate_bps,
        )
    }

    /// A table charging no fee at all.
    pub fn zero() -> Self {
        Self {
            splits: Vec::new(),
            max_total_bps: 0,
        }
    }

    /// Sum of all configured rates in basis points
    pub fn total_bps(&self) -> u64 {
        self.splits.iter().map(|s| s.rate_bps as u64).sum()
    }

    /// The configured splits, in order
    pub fn splits(&self) -> &[FeeSplit] {
        &self.splits
    }

    /// Compute the fee breakdown for a gross amount.
    ///
    /// Invariant: `sum(shares) + net == amount` exactly.
    pub fn compute(&self, amount: Amount) -> LedgerResult<FeeBreakdown> {
        let mut shares = Vec::with_capacity(self.splits.len());
        let mut fee_total: Amount = 0;
        for split in &self.splits {
            let share = share_of_bps(amount, split.rate_bps).ok_or(LedgerError::Overflow)?;
            fee_total = fee_total.checked_add(share).ok_or(LedgerError::Overflow)?;
            shares.push((split.recipient, share));
        }
        // total_bps <= 10000 guarantees fee_total <= amount
        let net = amount
            .checked_sub(fee_total)
            .ok_or(LedgerError::Overflow)?;
        Ok(FeeBreakdown {
            shares,
            fee_total,
            net,
        })
    }
}
