//! Account ledger.
//!
//! Owns the account→balance mapping and the total-supply counter.
//!
//! # Enforcement
//!
//! - `sum(balances) == total_supply` holds after every operation
//! - all arithmetic is checked; overflow aborts the operation
//! - multi-account writes are staged and committed only after every
//!   validation step succeeds, so a failed operation leaves no partial
//!   state behind

use std::collections::HashMap;

use lib_types::{mul_div, Address, Amount};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};
use crate::fees::FeeTable;

/// Account balances and total supply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountLedger {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

/// Result of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Amount debited from the sender
    pub gross: Amount,
    /// Amount credited to the recipient after fees
    pub net: Amount,
    /// Sum of all fee shares
    pub fee_total: Amount,
    /// Per-recipient fee shares in table order
    pub fee_shares: Vec<(Address, Amount)>,
}

/// Balance writes staged against a ledger, committed atomically.
///
/// Reads fall through to the ledger until an account has a staged write.
#[derive(Debug, Default)]
struct StagedWrites {
    writes: HashMap<Address, Amount>,
}

impl StagedWrites {
    fn balance(&self, ledger: &AccountLedger, account: &Address) -> Amount {
        match self.writes.get(account) {
            Some(balance) => *balance,
            None => ledger.balance_of(account),
        }
    }

    fn credit(
        &mut self,
        ledger: &AccountLedger,
        account: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        let current = self.balance(ledger, &account);
        let updated = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.writes.insert(account, updated);
        Ok(())
    }

    fn debit(
        &mut self,
        ledger: &AccountLedger,
        account: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        let current = self.balance(ledger, &account);
        if current < amount {
            return Err(LedgerError::InsufficientBalance {
                have: current,
                need: amount,
            });
        }
        self.writes.insert(account, current - amount);
        Ok(())
    }

    fn commit(self, ledger: &mut AccountLedger) {
        for (account, balance) in self.writes {
            ledger.balances.insert(account, balance);
        }
    }
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Number of accounts that have ever been credited
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    /// Move value into an account without touching total supply.
    pub fn credit(&mut self, account: Address, amount: Amount) -> LedgerResult<()> {
        let current = self.balance_of(&account);
        let updated = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.balances.insert(account, updated);
        Ok(())
    }

    /// Move value out of an account without touching total supply.
    pub fn debit(&mut self, account: Address, amount: Amount) -> LedgerResult<()> {
        let current = self.balance_of(&account);
        if current < amount {
            return Err(LedgerError::InsufficientBalance {
                have: current,
                need: amount,
            });
        }
        self.balances.insert(account, current - amount);
        Ok(())
    }

    /// Create new supply in an account.
    pub fn mint(&mut self, account: Address, amount: Amount) -> LedgerResult<()> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.credit(account, amount)?;
        self.total_supply = new_supply;
        Ok(())
    }

    /// Destroy supply held by an account.
    pub fn burn(&mut self, account: Address, amount: Amount) -> LedgerResult<()> {
        self.debit(account, amount)?;
        // debit succeeded, so amount <= total_supply
        self.total_supply -= amount;
        Ok(())
    }

    /// Transfer `amount` from `from`, splitting fees per `fee_table`.
    ///
    /// `None` degrades to a plain fee-free transfer. All balance writes are
    /// staged first and committed together; the sum invariant is preserved
    /// exactly because shares plus net always equal the gross amount.
    pub fn transfer_with_fee(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
        fee_table: Option<&FeeTable>,
    ) -> LedgerResult<TransferOutcome> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let mut staged = StagedWrites::default();
        staged.debit(self, from, amount)?;

        let (fee_shares, fee_total, net) = match fee_table {
            Some(table) => {
                let breakdown = table.compute(amount)?;
                for (recipient, share) in &breakdown.shares {
                    if *share > 0 {
                        staged.credit(self, *recipient, *share)?;
                    }
                }
                (breakdown.shares, breakdown.fee_total, breakdown.net)
            }
            None => (Vec::new(), 0, amount),
        };

        staged.credit(self, to, net)?;
        staged.commit(self);

        debug_assert!(self.verify_supply_invariant());

        Ok(TransferOutcome {
            gross: amount,
            net,
            fee_total,
            fee_shares,
        })
    }

    /// Multiply every balance and the total supply by `num / den`.
    ///
    /// Each balance is floored individually; the residual scaling error
    /// (new total minus the sum of floored balances) is credited to
    /// `residual_account` so the sum invariant holds exactly instead of
    /// drifting by one unit per account.
    ///
    /// Returns the new total supply.
    pub fn rescale_all(
        &mut self,
        num: Amount,
        den: Amount,
        residual_account: Address,
    ) -> LedgerResult<Amount> {
        if num == 0 || den == 0 {
            return Err(LedgerError::InvalidConfig(
                "rescale factor must be a positive rational".to_string(),
            ));
        }

        let new_total = mul_div(self.total_supply, num, den).ok_or(LedgerError::Overflow)?;

        let mut rescaled: Vec<(Address, Amount)> = Vec::with_capacity(self.balances.len());
        let mut sum: Amount = 0;
        for (account, balance) in &self.balances {
            let scaled = mul_div(*balance, num, den).ok_or(LedgerError::Overflow)?;
            sum = sum.checked_add(scaled).ok_or(LedgerError::Overflow)?;
            rescaled.push((*account, scaled));
        }

        // sum of per-account floors never exceeds the floor of the sum
        let residual = new_total - sum;

        for (account, balance) in rescaled {
            self.balances.insert(account, balance);
        }
        if residual > 0 {
            let current = self.balance_of(&residual_account);
            self.balances.insert(residual_account, current + residual);
        }
        self.total_supply = new_total;

        debug_assert!(self.verify_supply_invariant());

        Ok(new_total)
    }

    /// Recompute the balance sum and compare against the supply counter.
    pub fn verify_supply_invariant(&self) -> bool {
        let mut sum: Amount = 0;
        for balance in self.balances.values() {
            match sum.checked_add(*balance) {
                Some(next) => sum = next,
                None => return false,
            }
        }
        sum == self.total_supply
    }
}
