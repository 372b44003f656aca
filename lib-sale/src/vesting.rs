//! Vesting configuration and per-buyer purchase records.

use lib_types::{Amount, Timestamp};
use serde::{Deserialize, Serialize};

use crate::errors::{SaleError, SaleResult};

/// Ceiling on the configurable purchase delay: 7 days
pub const MAX_PURCHASE_DELAY: Timestamp = 7 * 24 * 60 * 60;

/// Admin-mutable vesting parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingConfig {
    /// Seconds each purchase stays locked
    pub vesting_duration: Timestamp,
    /// Minimum seconds between a buyer's purchases
    pub purchase_delay: Timestamp,
    /// Lifetime cap on a single buyer's cumulative purchases (ledger units)
    pub max_user_cap: Amount,
}

impl VestingConfig {
    pub fn validate(&self) -> SaleResult<()> {
        if self.vesting_duration == 0 {
            return Err(SaleError::InvalidVesting(
                "vesting duration must be > 0".to_string(),
            ));
        }
        if self.purchase_delay > MAX_PURCHASE_DELAY {
            return Err(SaleError::DelayTooLarge {
                delay: self.purchase_delay,
                max: MAX_PURCHASE_DELAY,
            });
        }
        if self.max_user_cap == 0 {
            return Err(SaleError::InvalidCap);
        }
        Ok(())
    }
}

/// Per-buyer purchase accounting.
///
/// Created on the first purchase and kept for the life of the sale; a fully
/// claimed record simply returns to zero lock fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Lifetime gross ledger units purchased
    pub cumulative_purchased: Amount,
    /// Time of the most recent purchase; `None` before the first
    pub last_purchase_time: Option<Timestamp>,
    /// Gross units still locked
    pub locked_amount: Amount,
    /// Single rolling release time, extended by each purchase
    pub lock_release_time: Timestamp,
}

impl PurchaseRecord {
    /// Whether the lock has matured at `now`.
    pub fn claimable(&self, now: Timestamp) -> bool {
        self.locked_amount > 0 && now >= self.lock_release_time
    }
}
