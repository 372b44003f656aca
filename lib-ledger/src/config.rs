//! Genesis configuration.
//!
//! Everything here is opaque configuration supplied once by the deployer:
//! initial anchor, wallet allocation percentages, fee table, rebase policy.
//! Nothing in the ledger hard-codes these values.

use lib_types::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};
use crate::fees::FeeTable;
use crate::pools::PoolFeeExemption;
use crate::rebase::RebasePolicy;

/// One genesis allocation bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Wallet receiving this bucket
    pub wallet: Address,
    /// Whole-number percentage of initial supply
    pub percent: u8,
    /// Human-readable bucket label ("public sale", "liquidity", ...)
    pub label: String,
}

/// Fixed percentage split of the initial supply across wallets.
///
/// An empty plan allocates the entire initial supply to the treasury.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    buckets: Vec<Allocation>,
}

impl AllocationPlan {
    /// Everything to the treasury.
    pub fn treasury_only() -> Self {
        Self::default()
    }

    /// Validate that percentages sum to exactly 100.
    pub fn new(buckets: Vec<Allocation>) -> LedgerResult<Self> {
        let total: u32 = buckets.iter().map(|b| b.percent as u32).sum();
        if total != 100 {
            return Err(LedgerError::InvalidConfig(format!(
                "allocation percentages sum to {}, expected 100",
                total
            )));
        }
        for bucket in &buckets {
            if bucket.wallet.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
            if bucket.percent == 0 {
                return Err(LedgerError::InvalidConfig(format!(
                    "allocation bucket '{}' has zero percent",
                    bucket.label
                )));
            }
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> &[Allocation] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Initialization-time token configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    /// Display decimals; ledger amounts are always scale 1e18
    pub decimals: u8,
    /// Initial market-cap anchor, unscaled. Initial supply is
    /// `initial_anchor * SCALE`.
    pub initial_anchor: Amount,
    pub owner: Address,
    pub treasury: Address,
    pub fee_table: FeeTable,
    pub rebase_policy: RebasePolicy,
    pub pool_fee_exemption: PoolFeeExemption,
    pub allocations: AllocationPlan,
}

impl TokenConfig {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.owner.is_zero() || self.treasury.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if self.initial_anchor == 0 {
            return Err(LedgerError::ZeroAnchor);
        }
        self.rebase_policy.validate()?;
        Ok(())
    }
}
