//! Ledger errors

use lib_types::{Address, Amount, Timestamp};
use thiserror::Error;

/// Error during ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Contract is paused")]
    Paused,

    #[error("Zero amount not allowed")]
    ZeroAmount,

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Rebase too soon: {elapsed}s elapsed, {min_interval}s required")]
    RebaseTooSoon {
        elapsed: Timestamp,
        min_interval: Timestamp,
    },

    #[error("Anchor must be greater than zero")]
    ZeroAnchor,

    #[error("Governor already set")]
    GovernorAlreadySet,

    #[error("Pool already registered: {0}")]
    PoolAlreadyRegistered(Address),

    #[error("Pool not registered: {0}")]
    PoolNotRegistered(Address),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
