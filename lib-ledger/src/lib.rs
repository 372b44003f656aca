//! Elastic-supply token ledger.
//!
//! This crate defines the fee/rebase ledger primitives.
//!
//! # Key Types
//!
//! - [`ElasticToken`]: the token facade tying ledger, fees, roles, pools
//!   and rebase state together
//! - [`AccountLedger`]: account balances and the total-supply counter
//! - [`FeeTable`]: the split transfer-fee schedule
//! - [`RebasePolicy`]: interval throttle and ratio bounds for rebases
//!
//! # Execution
//!
//! The host applies operations one at a time in a total order; each entry
//! point either commits all of its state changes or none of them.

pub mod access;
pub mod config;
pub mod errors;
pub mod events;
pub mod fees;
pub mod ledger;
pub mod pools;
pub mod rebase;
pub mod token;

pub use access::AccessControl;
pub use config::{Allocation, AllocationPlan, TokenConfig};
pub use errors::{LedgerError, LedgerResult};
pub use events::LedgerEvent;
pub use fees::{FeeBreakdown, FeeSplit, FeeTable};
pub use ledger::{AccountLedger, TransferOutcome};
pub use pools::{LiquidityPoolRegistry, PoolFeeExemption};
pub use rebase::{RebasePolicy, RebaseState};
pub use token::ElasticToken;
