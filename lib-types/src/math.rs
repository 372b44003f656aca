//! Fixed-point ledger arithmetic.
//!
//! All ledger amounts are unsigned integers scaled by 1e18. Every
//! multiply/divide in the system goes through this module so that the
//! rounding direction (floor) and overflow behavior (checked, never
//! wrapping) are defined in exactly one place.

use crate::primitives::{Amount, Bps};

uint::construct_uint! {
    /// 256-bit unsigned integer used for multiply-divide intermediates.
    pub struct U256(4);
}

/// Fixed-point base: 1e18 atomic units per whole token
pub const SCALE: Amount = 1_000_000_000_000_000_000;

/// Basis point denominator (10000 = 100%)
pub const BPS_DENOM: Amount = 10_000;

/// Compute `floor(a * b / den)` without intermediate overflow.
///
/// Returns `None` when `den == 0` or the quotient does not fit in an
/// `Amount`.
pub fn mul_div(a: Amount, b: Amount, den: Amount) -> Option<Amount> {
    if den == 0 {
        return None;
    }
    let wide = U256::from(a) * U256::from(b);
    let quotient = wide / U256::from(den);
    if quotient > U256::from(Amount::MAX) {
        return None;
    }
    Some(quotient.as_u128())
}

/// Compute a basis-point share of an amount: `floor(amount * bps / 10_000)`.
pub fn share_of_bps(amount: Amount, bps: Bps) -> Option<Amount> {
    mul_div(amount, bps as Amount, BPS_DENOM)
}
