//! External payment-asset ledger collaborator.
//!
//! The sale engine pulls payment funds from buyers through this trait; the
//! real implementation lives with the host. An in-memory reference
//! implementation ships here for tests and local runs.

use std::collections::HashMap;

use lib_types::{Address, Amount, AssetId};
use serde::{Deserialize, Serialize};

use crate::errors::PaymentError;

/// Minimal interface the sale engine needs from the payment-asset ledger.
pub trait PaymentLedger {
    /// Move `amount` of `asset` from `from` to `to`, spending the allowance
    /// `from` granted to `spender`.
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PaymentError>;
}

/// In-memory payment ledger with balances and allowances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryPaymentLedger {
    balances: HashMap<(AssetId, Address), Amount>,
    allowances: HashMap<(AssetId, Address, Address), Amount>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, asset: AssetId, to: Address, amount: Amount) {
        let entry = self.balances.entry((asset, to)).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    pub fn approve(&mut self, asset: AssetId, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((asset, owner, spender), amount);
    }

    pub fn balance_of(&self, asset: &AssetId, account: &Address) -> Amount {
        self.balances.get(&(*asset, *account)).copied().unwrap_or(0)
    }

    pub fn allowance(&self, asset: &AssetId, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*asset, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }
}

impl PaymentLedger for InMemoryPaymentLedger {
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), PaymentError> {
        let allowance = self.allowance(asset, from, spender);
        if allowance < amount {
            return Err(PaymentError::InsufficientAllowance {
                have: allowance,
                need: amount,
            });
        }
        let balance = self.balance_of(asset, from);
        if balance < amount {
            return Err(PaymentError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }

        self.allowances
            .insert((*asset, *from, *spender), allowance - amount);
        self.balances.insert((*asset, *from), balance - amount);
        let to_balance = self.balance_of(asset, to);
        self.balances
            .insert((*asset, *to), to_balance.saturating_add(amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    fn asset(id: u8) -> AssetId {
        AssetId::new([id; 32])
    }

    #[test]
    fn test_transfer_from_happy_path() {
        let mut payments = InMemoryPaymentLedger::new();
        payments.mint(asset(1), addr(1), 1_000);
        payments.approve(asset(1), addr(1), addr(9), 600);

        payments
            .transfer_from(&asset(1), &addr(9), &addr(1), &addr(2), 500)
            .unwrap();

        assert_eq!(payments.balance_of(&asset(1), &addr(1)), 500);
        assert_eq!(payments.balance_of(&asset(1), &addr(2)), 500);
        assert_eq!(payments.allowance(&asset(1), &addr(1), &addr(9)), 100);
    }

    #[test]
    fn test_allowance_enforced() {
        let mut payments = InMemoryPaymentLedger::new();
        payments.mint(asset(1), addr(1), 1_000);

        let result = payments.transfer_from(&asset(1), &addr(9), &addr(1), &addr(2), 500);
        assert!(matches!(
            result,
            Err(PaymentError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn test_balance_enforced() {
        let mut payments = InMemoryPaymentLedger::new();
        payments.mint(asset(1), addr(1), 100);
        payments.approve(asset(1), addr(1), addr(9), 500);

        let result = payments.transfer_from(&asset(1), &addr(9), &addr(1), &addr(2), 500);
        assert!(matches!(
            result,
            Err(PaymentError::InsufficientBalance { .. })
        ));
    }
}
