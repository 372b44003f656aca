//! Ledger events.
//!
//! Every state-changing entry point on the token emits one event carrying
//! the values needed to reconstruct the invariant check downstream.

use lib_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Elastic token events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Transfer settled, fees split
    TransferCompleted {
        from: Address,
        to: Address,
        /// Amount debited from the sender
        gross: Amount,
        /// Amount credited to the recipient
        net: Amount,
        /// Sum of all fee shares
        fee_total: Amount,
        /// Per-recipient fee breakdown in table order
        fee_shares: Vec<(Address, Amount)>,
    },

    /// Supply rescaled toward a new anchor
    RebaseApplied {
        /// Previous anchor scaled by 1e18
        old_anchor_scaled: Amount,
        /// New anchor scaled by 1e18
        new_anchor_scaled: Amount,
        /// Applied (clamped) ratio scaled by 1e18
        ratio_scaled: Amount,
        /// Total supply after the rescale
        new_total_supply: Amount,
        timestamp: Timestamp,
    },

    /// Supply minted by the supply-adjustment hook
    Minted { to: Address, amount: Amount },

    /// Supply burned from an account's own balance
    Burned { from: Address, amount: Amount },

    Paused { by: Address },
    Unpaused { by: Address },

    GovernorSet { governor: Address },
    OwnershipTransferred { old_owner: Address, new_owner: Address },
    TreasuryUpdated { old_treasury: Address, new_treasury: Address },

    /// Transfer-fee schedule replaced
    FeeTableUpdated { total_bps: u64 },

    PoolAdded { pool: Address },
    PoolRemoved { pool: Address },
}
