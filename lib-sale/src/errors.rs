//! Sale engine errors

use lib_ledger::LedgerError;
use lib_types::{Amount, AssetId, Timestamp};
use thiserror::Error;

/// Error from the external payment-asset ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Insufficient payment balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient payment allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Unknown payment asset: {0}")]
    UnknownAsset(AssetId),
}

/// Error during sale operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    #[error("Sale not active: now {now}, window [{start}, {end})")]
    SaleNotActive {
        now: Timestamp,
        start: Timestamp,
        end: Timestamp,
    },

    #[error("Sale not ended: now {now}, ends at {end}")]
    SaleNotEnded { now: Timestamp, end: Timestamp },

    #[error("Sale already finalized")]
    AlreadyFinalized,

    #[error("Payment asset not allowed: {0}")]
    AssetNotAllowed(AssetId),

    #[error("Payment asset already allowed: {0}")]
    AssetAlreadyAllowed(AssetId),

    #[error("Exchange rate must be greater than zero")]
    ZeroRate,

    #[error("Zero amount not allowed")]
    ZeroAmount,

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Purchase exceeds user cap: cumulative {cumulative} + requested {requested} > cap {cap}")]
    CapExceeded {
        cumulative: Amount,
        requested: Amount,
        cap: Amount,
    },

    #[error("Purchase too soon: {elapsed}s elapsed, {delay}s required")]
    PurchaseTooSoon { elapsed: Timestamp, delay: Timestamp },

    #[error("No tokens to claim")]
    NothingToClaim,

    #[error("Nothing to burn")]
    NothingToBurn,

    #[error("Invalid vesting config: {0}")]
    InvalidVesting(String),

    #[error("Purchase delay too large: {delay}s exceeds ceiling {max}s")]
    DelayTooLarge { delay: Timestamp, max: Timestamp },

    #[error("Max user cap must be greater than zero")]
    InvalidCap,

    #[error("Invalid sale window: start {start} must precede end {end}")]
    InvalidWindow { start: Timestamp, end: Timestamp },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Result type for sale operations
pub type SaleResult<T> = Result<T, SaleError>;
