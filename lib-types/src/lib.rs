//! Index ledger primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: No String identifiers in ledger state. Ever.

pub mod math;
pub mod primitives;

pub use math::{mul_div, share_of_bps, BPS_DENOM, SCALE, U256};
pub use primitives::{Address, Amount, AssetId, Bps, Timestamp};
