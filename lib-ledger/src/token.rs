//! Elastic token facade.
//!
//! Ties the account ledger, fee table, role set, pool registry and rebase
//! state together behind the entry points the host exposes. Every mutating
//! call returns the event it emitted; every privileged call runs its role
//! guard before touching state.

use lib_types::{mul_div, Address, Amount, Bps, Timestamp, SCALE};
use serde::{Deserialize, Serialize};

use crate::access::AccessControl;
use crate::config::TokenConfig;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::fees::{FeeSplit, FeeTable};
use crate::ledger::{AccountLedger, TransferOutcome};
use crate::pools::{LiquidityPoolRegistry, PoolFeeExemption};
use crate::rebase::{RebasePolicy, RebaseState};

/// Elastic-supply token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticToken {
    name: String,
    symbol: String,
    decimals: u8,
    treasury: Address,
    ledger: AccountLedger,
    fees: FeeTable,
    access: AccessControl,
    pools: LiquidityPoolRegistry,
    pool_fee_exemption: PoolFeeExemption,
    rebase_policy: RebasePolicy,
    rebase_state: RebaseState,
}

impl ElasticToken {
    /// Initialize the token at `now`, minting the initial supply across the
    /// configured allocation buckets (remainder to the treasury; an empty
    /// plan allocates everything to the treasury).
    pub fn new(config: TokenConfig, now: Timestamp) -> LedgerResult<Self> {
        config.validate()?;

        let initial_supply = config
            .initial_anchor
            .checked_mul(SCALE)
            .ok_or(LedgerError::Overflow)?;

        let mut ledger = AccountLedger::new();
        if config.allocations.is_empty() {
            ledger.mint(config.treasury, initial_supply)?;
        } else {
            let mut allocated: Amount = 0;
            for bucket in config.allocations.buckets() {
                let share = mul_div(initial_supply, bucket.percent as Amount, 100)
                    .ok_or(LedgerError::Overflow)?;
                ledger.mint(bucket.wallet, share)?;
                allocated = allocated.checked_add(share).ok_or(LedgerError::Overflow)?;
            }
            // percentage floors can leave a few units unassigned
            let remainder = initial_supply - allocated;
            if remainder > 0 {
                ledger.mint(config.treasury, remainder)?;
            }
        }

        tracing::info!(
            "Token {} ({}) initialized: supply {}, anchor {}",
            config.name,
            config.symbol,
            initial_supply,
            config.initial_anchor
        );

        Ok(Self {
            name: config.name,
            symbol: config.symbol,
            decimals: config.decimals,
            treasury: config.treasury,
            ledger,
            fees: config.fee_table,
            access: AccessControl::new(config.owner)?,
            pools: LiquidityPoolRegistry::new(),
            pool_fee_exemption: config.pool_fee_exemption,
            rebase_policy: config.rebase_policy,
            rebase_state: RebaseState {
                last_anchor: config.initial_anchor,
                last_rebase_time: now,
            },
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn governor(&self) -> Option<Address> {
        self.access.governor()
    }

    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    pub fn fee_table(&self) -> &FeeTable {
        &self.fees
    }

    pub fn last_anchor(&self) -> Amount {
        self.rebase_state.last_anchor
    }

    pub fn pool_count(&self) -> usize {
        self.pools.count()
    }

    pub fn pool_at(&self, index: usize) -> Option<Address> {
        self.pools.pool_at(index)
    }

    pub fn is_pool(&self, account: &Address) -> bool {
        self.pools.contains(account)
    }

    /// Recheck the balance-sum invariant (test and audit hook).
    pub fn verify_supply_invariant(&self) -> bool {
        self.ledger.verify_supply_invariant()
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Transfer with the configured fee split.
    ///
    /// Registered pool accounts skip the fee in directions the exemption
    /// config marks exempt, degrading to a plain transfer.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<(TransferOutcome, LedgerEvent)> {
        self.access.ensure_active()?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let exempt = (self.pool_fee_exemption.exempt_as_sender && self.pools.contains(&from))
            || (self.pool_fee_exemption.exempt_as_recipient && self.pools.contains(&to));
        let table = if exempt { None } else { Some(&self.fees) };

        let outcome = self.ledger.transfer_with_fee(from, to, amount, table)?;
        let event = LedgerEvent::TransferCompleted {
            from,
            to,
            gross: outcome.gross,
            net: outcome.net,
            fee_total: outcome.fee_total,
            fee_shares: outcome.fee_shares.clone(),
        };
        Ok((outcome, event))
    }

    // =========================================================================
    // Supply adjustment
    // =========================================================================

    /// Rescale supply toward a new anchor.
    ///
    /// Admin-only. Fails while the interval has not elapsed; the implied
    /// ratio is clamped to the policy bounds before it is applied, and the
    /// raw anchor is stored regardless of the clamp.
    pub fn rebase(
        &mut self,
        caller: &Address,
        new_anchor: Amount,
        now: Timestamp,
    ) -> LedgerResult<LedgerEvent> {
        self.access.require_admin(caller)?;
        if new_anchor == 0 {
            return Err(LedgerError::ZeroAnchor);
        }
        self.rebase_state.ensure_eligible(&self.rebase_policy, now)?;

        // every event quantity is computed before any state is touched, so
        // an overflowing anchor fails the whole call with nothing applied
        let old_anchor = self.rebase_state.last_anchor;
        let old_anchor_scaled = old_anchor.checked_mul(SCALE).ok_or(LedgerError::Overflow)?;
        let new_anchor_scaled = new_anchor.checked_mul(SCALE).ok_or(LedgerError::Overflow)?;
        let (num, den) = self.rebase_policy.clamp_ratio(old_anchor, new_anchor)?;
        let ratio_scaled = mul_div(num, SCALE, den).ok_or(LedgerError::Overflow)?;

        let new_total = self.ledger.rescale_all(num, den, self.treasury)?;

        self.rebase_state.last_anchor = new_anchor;
        self.rebase_state.last_rebase_time = now;
        tracing::info!(
            "Rebase applied: anchor {} -> {}, ratio {}/{}, new supply {}",
            old_anchor,
            new_anchor,
            num,
            den,
            new_total
        );

        Ok(LedgerEvent::RebaseApplied {
            old_anchor_scaled,
            new_anchor_scaled,
            ratio_scaled,
            new_total_supply: new_total,
            timestamp: now,
        })
    }

    /// Admin supply-increase hook for the market-cap batch job.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<LedgerEvent> {
        self.access.require_admin(caller)?;
        self.access.ensure_active()?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.ledger.mint(to, amount)?;
        Ok(LedgerEvent::Minted { to, amount })
    }

    /// Burn from the account's own balance. The host authenticates that the
    /// caller is `account`; no role is required to destroy one's own tokens.
    pub fn burn(&mut self, account: Address, amount: Amount) -> LedgerResult<LedgerEvent> {
        self.access.ensure_active()?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.ledger.burn(account, amount)?;
        Ok(LedgerEvent::Burned {
            from: account,
            amount,
        })
    }

    // =========================================================================
    // Administration
    // =========================================================================

    pub fn pause(&mut self, caller: &Address) -> LedgerResult<LedgerEvent> {
        self.access.pause(caller)?;
        Ok(LedgerEvent::Paused { by: *caller })
    }

    pub fn unpause(&mut self, caller: &Address) -> LedgerResult<LedgerEvent> {
        self.access.unpause(caller)?;
        Ok(LedgerEvent::Unpaused { by: *caller })
    }

    pub fn set_governor(
        &mut self,
        caller: &Address,
        governor: Address,
    ) -> LedgerResult<LedgerEvent> {
        self.access.set_governor(caller, governor)?;
        Ok(LedgerEvent::GovernorSet { governor })
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> LedgerResult<LedgerEvent> {
        let old_owner = self.access.owner();
        self.access.transfer_ownership(caller, new_owner)?;
        Ok(LedgerEvent::OwnershipTransferred {
            old_owner,
            new_owner,
        })
    }

    /// Replace the transfer-fee schedule.
    ///
    /// The new splits go through the same cap validation as at
    /// construction; a rejected table leaves the current one in place.
    pub fn update_fee_table(
        &mut self,
        caller: &Address,
        splits: Vec<FeeSplit>,
        max_total_bps: Bps,
    ) -> LedgerResult<LedgerEvent> {
        self.access.require_admin(caller)?;
        let table = FeeTable::new(splits, max_total_bps)?;
        let total_bps = table.total_bps();
        self.fees = table;
        Ok(LedgerEvent::FeeTableUpdated { total_bps })
    }

    pub fn update_treasury(
        &mut self,
        caller: &Address,
        new_treasury: Address,
    ) -> LedgerResult<LedgerEvent> {
        self.access.require_admin(caller)?;
        if new_treasury.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let old_treasury = self.treasury;
        self.treasury = new_treasury;
        Ok(LedgerEvent::TreasuryUpdated {
            old_treasury,
            new_treasury,
        })
    }

    pub fn add_liquidity_pool(
        &mut self,
        caller: &Address,
        pool: Address,
    ) -> LedgerResult<LedgerEvent> {
        self.access.require_admin(caller)?;
        self.pools.add_pool(pool)?;
        Ok(LedgerEvent::PoolAdded { pool })
    }

    pub fn remove_liquidity_pool(
        &mut self,
        caller: &Address,
        pool: &Address,
    ) -> LedgerResult<LedgerEvent> {
        self.access.require_admin(caller)?;
        self.pools.remove_pool(pool)?;
        Ok(LedgerEvent::PoolRemoved { pool: *pool })
    }
}
