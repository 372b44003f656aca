//! Rebase throttle and ratio clamping.
//!
//! A rebase rescales the whole ledger toward an externally supplied anchor
//! (a market-capitalization figure). The engine places no constraint on the
//! anchor's accuracy, only on its timing (minimum interval between calls)
//! and magnitude (the implied ratio is clamped to configured bounds before
//! it is applied).

use lib_types::{Amount, Bps, Timestamp, BPS_DENOM};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// Interval throttle and per-call ratio bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebasePolicy {
    /// Minimum seconds between rebases
    pub min_interval: Timestamp,
    /// Maximum supply increase per call, in basis points (10000 = +100%)
    pub max_increase_bps: Bps,
    /// Maximum supply decrease per call, in basis points (5000 = -50%)
    pub max_decrease_bps: Bps,
}

impl RebasePolicy {
    /// Observed production defaults: daily cadence, +100% / -50% bounds.
    pub const DEFAULT: Self = Self {
        min_interval: 86_400,
        max_increase_bps: 10_000,
        max_decrease_bps: 5_000,
    };

    pub fn validate(&self) -> LedgerResult<()> {
        if self.max_decrease_bps as Amount >= BPS_DENOM {
            return Err(LedgerError::InvalidConfig(
                "max decrease must be below 100%".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp the ratio `new_anchor / last_anchor` to the configured bounds.
    ///
    /// Returns the (numerator, denominator) pair that actually drives the
    /// rescale. The clamp, not the raw ratio, determines the scaling factor.
    pub fn clamp_ratio(
        &self,
        last_anchor: Amount,
        new_anchor: Amount,
    ) -> LedgerResult<(Amount, Amount)> {
        let lhs = new_anchor
            .checked_mul(BPS_DENOM)
            .ok_or(LedgerError::Overflow)?;
        let upper = last_anchor
            .checked_mul(BPS_DENOM + self.max_increase_bps as Amount)
            .ok_or(LedgerError::Overflow)?;
        let lower = last_anchor
            .checked_mul(BPS_DENOM - self.max_decrease_bps as Amount)
            .ok_or(LedgerError::Overflow)?;

        if lhs > upper {
            Ok((BPS_DENOM + self.max_increase_bps as Amount, BPS_DENOM))
        } else if lhs < lower {
            Ok((BPS_DENOM - self.max_decrease_bps as Amount, BPS_DENOM))
        } else {
            Ok((new_anchor, last_anchor))
        }
    }
}

impl Default for RebasePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mutable rebase bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebaseState {
    /// Anchor value the supply currently tracks (unscaled)
    pub last_anchor: Amount,
    /// Timestamp of the previous rebase (genesis time initially)
    pub last_rebase_time: Timestamp,
}

impl RebaseState {
    /// Fails with `RebaseTooSoon` while the interval has not elapsed.
    pub fn ensure_eligible(&self, policy: &RebasePolicy, now: Timestamp) -> LedgerResult<()> {
        let elapsed = now.saturating_sub(self.last_rebase_time);
        if elapsed < policy.min_interval {
            return Err(LedgerError::RebaseTooSoon {
                elapsed,
                min_interval: policy.min_interval,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_within_bounds_passes_through() {
        let policy = RebasePolicy::DEFAULT;
        assert_eq!(policy.clamp_ratio(1_000, 1_500).unwrap(), (1_500, 1_000));
        assert_eq!(policy.clamp_ratio(1_000, 2_000).unwrap(), (2_000, 1_000));
        assert_eq!(policy.clamp_ratio(1_000, 500).unwrap(), (500, 1_000));
    }

    #[test]
    fn test_ratio_clamped_upward() {
        let policy = RebasePolicy::DEFAULT;
        // 3x requested, clamped to +100%
        assert_eq!(policy.clamp_ratio(1_000, 3_000).unwrap(), (20_000, 10_000));
    }

    #[test]
    fn test_ratio_clamped_downward() {
        let policy = RebasePolicy::DEFAULT;
        // -90% requested, clamped to -50%
        assert_eq!(policy.clamp_ratio(1_000, 100).unwrap(), (5_000, 10_000));
    }

    #[test]
    fn test_throttle() {
        let policy = RebasePolicy::DEFAULT;
        let state = RebaseState {
            last_anchor: 1_000,
            last_rebase_time: 100_000,
        };

        assert_eq!(
            state.ensure_eligible(&policy, 100_000 + 86_399),
            Err(LedgerError::RebaseTooSoon {
                elapsed: 86_399,
                min_interval: 86_400,
            })
        );
        assert!(state.ensure_eligible(&policy, 100_000 + 86_400).is_ok());
    }

    #[test]
    fn test_full_decrease_bound_rejected() {
        let policy = RebasePolicy {
            min_interval: 0,
            max_increase_bps: 10_000,
            max_decrease_bps: 10_000,
        };
        assert!(policy.validate().is_err());
    }
}
