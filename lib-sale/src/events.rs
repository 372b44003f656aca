//! Sale events.

use lib_types::{Address, Amount, AssetId, Timestamp};
use serde::{Deserialize, Serialize};

/// Sale engine events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SaleEvent {
    /// Purchase settled
    PurchaseCompleted {
        buyer: Address,
        asset: AssetId,
        /// Payment pulled from the buyer, in the asset's own decimals
        payment_amount: Amount,
        /// Gross ledger units exchanged (pre-fee)
        gross_amount: Amount,
        timestamp: Timestamp,
    },

    /// Buyer's matured lock released
    TokensClaimed {
        buyer: Address,
        amount: Amount,
        timestamp: Timestamp,
    },

    AllowedAssetAdded {
        asset: AssetId,
        rate: Amount,
    },

    AllowedAssetRemoved {
        asset: AssetId,
    },

    VestingConfigUpdated {
        vesting_duration: Timestamp,
        purchase_delay: Timestamp,
        max_user_cap: Amount,
    },

    TreasuryUpdated {
        old_treasury: Address,
        new_treasury: Address,
    },

    SalePaused {
        by: Address,
    },

    SaleUnpaused {
        by: Address,
    },

    /// Sale finalized, unsold supply burned
    Finalized {
        burned: Amount,
        timestamp: Timestamp,
    },
}
