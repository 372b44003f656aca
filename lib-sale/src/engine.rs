//! Sale engine.
//!
//! One engine instance per sale. The lifecycle is
//! `NotStarted -> Active -> Ended -> Finalized`: the first three states are
//! implied by wall-clock time crossing the window bounds, the last by the
//! one-shot `finalize` call.
//!
//! The engine owns no ledger balances itself; it drives the elastic token
//! (its `sale_account` holds the sellable supply) and the external payment
//! ledger, and keeps the vesting lock bookkeeping on top.

use std::collections::HashMap;

use lib_ledger::{AccessControl, ElasticToken, LedgerError};
use lib_types::{mul_div, Address, Amount, AssetId, Timestamp, SCALE};
use serde::{Deserialize, Serialize};

use crate::assets::{AllowedAsset, AssetRegistry};
use crate::errors::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::payment::PaymentLedger;
use crate::vesting::{PurchaseRecord, VestingConfig};

/// Immutable sale timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleWindow {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl SaleWindow {
    pub fn validate(&self) -> SaleResult<()> {
        if self.start_time >= self.end_time {
            return Err(SaleError::InvalidWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Purchases are accepted while `start <= now < end`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        now >= self.start_time && now < self.end_time
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.end_time
    }
}

/// Initialization-time sale configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleConfig {
    /// Ledger account holding the sellable supply
    pub sale_account: Address,
    pub owner: Address,
    /// Receives pulled payment funds
    pub treasury: Address,
    pub window: SaleWindow,
    pub vesting: VestingConfig,
    /// Assets accepted from the start (more can be added by the admin)
    pub initial_assets: Vec<AllowedAsset>,
}

/// Result of a completed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    /// Payment pulled from the buyer (asset decimals)
    pub payment_amount: Amount,
    /// Gross ledger units exchanged and locked
    pub gross_amount: Amount,
    /// Units credited to the buyer after the transfer fee
    pub net_amount: Amount,
    /// Transfer fee retained by the fee recipients
    pub fee_total: Amount,
}

/// Multi-asset public sale with vesting locks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleEngine {
    sale_account: Address,
    treasury: Address,
    access: AccessControl,
    window: SaleWindow,
    assets: AssetRegistry,
    vesting: VestingConfig,
    purchases: HashMap<Address, PurchaseRecord>,
    total_locked: Amount,
    finalized: bool,
}

impl SaleEngine {
    pub fn new(config: SaleConfig) -> SaleResult<Self> {
        if config.sale_account.is_zero() || config.treasury.is_zero() {
            return Err(SaleError::ZeroAddress);
        }
        config.window.validate()?;
        config.vesting.validate()?;

        let mut assets = AssetRegistry::new();
        for asset in config.initial_assets {
            assets.add(asset)?;
        }

        Ok(Self {
            sale_account: config.sale_account,
            treasury: config.treasury,
            access: AccessControl::new(config.owner)?,
            window: config.window,
            assets,
            vesting: config.vesting,
            purchases: HashMap::new(),
            total_locked: 0,
            finalized: false,
        })
    }

    // =========================================================================
    // Queries (never gated by the pause flag)
    // =========================================================================

    pub fn sale_account(&self) -> Address {
        self.sale_account
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn window(&self) -> SaleWindow {
        self.window
    }

    pub fn vesting(&self) -> VestingConfig {
        self.vesting
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        self.window.is_active(now)
    }

    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    pub fn finalized(&self) -> bool {
        self.finalized
    }

    pub fn total_locked(&self) -> Amount {
        self.total_locked
    }

    pub fn allowed_asset(&self, id: &AssetId) -> SaleResult<&AllowedAsset> {
        self.assets.get(id)
    }

    pub fn is_allowed_asset(&self, id: &AssetId) -> bool {
        self.assets.is_allowed(id)
    }

    pub fn purchase_record(&self, buyer: &Address) -> Option<&PurchaseRecord> {
        self.purchases.get(buyer)
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Exchange `payment_amount` of an allowed asset for ledger units.
    ///
    /// The gross amount is `payment_amount * SCALE / rate` (floored). The
    /// buyer is credited through the token's fee-charging transfer, so the
    /// received balance is net of fee, while the vesting lock tracks the
    /// gross amount. Each purchase extends the buyer's single release time
    /// to `now + vesting_duration`.
    ///
    /// All validation runs before the payment pull so a failed purchase
    /// moves no funds on either ledger.
    pub fn buy(
        &mut self,
        buyer: Address,
        asset_id: &AssetId,
        payment_amount: Amount,
        now: Timestamp,
        token: &mut ElasticToken,
        payments: &mut dyn PaymentLedger,
    ) -> SaleResult<(PurchaseOutcome, SaleEvent)> {
        let rate = self.assets.get(asset_id)?.rate;

        if !self.window.is_active(now) {
            return Err(SaleError::SaleNotActive {
                now,
                start: self.window.start_time,
                end: self.window.end_time,
            });
        }
        self.access.ensure_active()?;

        if payment_amount == 0 {
            return Err(SaleError::ZeroAmount);
        }
        let gross = mul_div(payment_amount, SCALE, rate).ok_or(SaleError::Overflow)?;
        if gross == 0 {
            return Err(SaleError::ZeroAmount);
        }

        let record = self.purchases.get(&buyer).copied().unwrap_or_default();

        let cumulative = record
            .cumulative_purchased
            .checked_add(gross)
            .ok_or(SaleError::Overflow)?;
        if cumulative > self.vesting.max_user_cap {
            return Err(SaleError::CapExceeded {
                cumulative: record.cumulative_purchased,
                requested: gross,
                cap: self.vesting.max_user_cap,
            });
        }

        // delay check skipped for a buyer's first purchase
        if let Some(last) = record.last_purchase_time {
            let elapsed = now.saturating_sub(last);
            if elapsed < self.vesting.purchase_delay {
                return Err(SaleError::PurchaseTooSoon {
                    elapsed,
                    delay: self.vesting.purchase_delay,
                });
            }
        }

        // token-side preconditions, checked before any funds move
        if token.is_paused() {
            return Err(SaleError::Ledger(LedgerError::Paused));
        }
        let available = token.balance_of(&self.sale_account);
        if available < gross {
            return Err(SaleError::Ledger(LedgerError::InsufficientBalance {
                have: available,
                need: gross,
            }));
        }

        // the lock bookkeeping arithmetic must also succeed before any
        // funds move
        let locked_amount = record
            .locked_amount
            .checked_add(gross)
            .ok_or(SaleError::Overflow)?;
        let lock_release_time = now
            .checked_add(self.vesting.vesting_duration)
            .ok_or(SaleError::Overflow)?;
        let total_locked = self
            .total_locked
            .checked_add(gross)
            .ok_or(SaleError::Overflow)?;

        payments.transfer_from(
            asset_id,
            &self.sale_account,
            &buyer,
            &self.treasury,
            payment_amount,
        )?;

        let (outcome, _) = token.transfer(self.sale_account, buyer, gross)?;

        self.purchases.insert(
            buyer,
            PurchaseRecord {
                cumulative_purchased: cumulative,
                last_purchase_time: Some(now),
                locked_amount,
                lock_release_time,
            },
        );
        self.total_locked = total_locked;

        tracing::info!(
            "Purchase: buyer {} paid {} of asset {}, received {} gross ({} net)",
            buyer,
            payment_amount,
            asset_id,
            gross,
            outcome.net
        );

        Ok((
            PurchaseOutcome {
                payment_amount,
                gross_amount: gross,
                net_amount: outcome.net,
                fee_total: outcome.fee_total,
            },
            SaleEvent::PurchaseCompleted {
                buyer,
                asset: *asset_id,
                payment_amount,
                gross_amount: gross,
                timestamp: now,
            },
        ))
    }

    /// Release the buyer's entire matured lock.
    ///
    /// The purchased balance was already credited at purchase time; claiming
    /// only clears the lock bookkeeping. Claiming before the release time,
    /// or with nothing locked, is a hard error so callers can tell "already
    /// claimed" from "claimed just now".
    pub fn claim(&mut self, buyer: Address, now: Timestamp) -> SaleResult<(Amount, SaleEvent)> {
        let record = self
            .purchases
            .get_mut(&buyer)
            .ok_or(SaleError::NothingToClaim)?;
        if !record.claimable(now) {
            return Err(SaleError::NothingToClaim);
        }

        let amount = record.locked_amount;
        record.locked_amount = 0;
        // total_locked is the sum of all individual locks
        self.total_locked -= amount;

        tracing::info!("Claim: buyer {} released {} locked units", buyer, amount);

        Ok((
            amount,
            SaleEvent::TokensClaimed {
                buyer,
                amount,
                timestamp: now,
            },
        ))
    }

    /// One-shot finalization: burn everything the sale account still holds
    /// beyond what is promised to buyers.
    ///
    /// Burns exactly `balance(sale_account) - total_locked` and never
    /// touches `total_locked` itself.
    pub fn finalize(
        &mut self,
        caller: &Address,
        now: Timestamp,
        token: &mut ElasticToken,
    ) -> SaleResult<(Amount, SaleEvent)> {
        self.access.require_admin(caller)?;
        if !self.window.has_ended(now) {
            return Err(SaleError::SaleNotEnded {
                now,
                end: self.window.end_time,
            });
        }
        if self.finalized {
            return Err(SaleError::AlreadyFinalized);
        }

        let balance = token.balance_of(&self.sale_account);
        if balance <= self.total_locked {
            return Err(SaleError::NothingToBurn);
        }
        let burn_amount = balance - self.total_locked;

        token.burn(self.sale_account, burn_amount)?;
        self.finalized = true;

        tracing::info!(
            "Sale finalized: burned {} unsold units, {} still locked",
            burn_amount,
            self.total_locked
        );

        Ok((
            burn_amount,
            SaleEvent::Finalized {
                burned: burn_amount,
                timestamp: now,
            },
        ))
    }

    // =========================================================================
    // Administration
    // =========================================================================

    pub fn add_allowed_asset(
        &mut self,
        caller: &Address,
        asset: AllowedAsset,
    ) -> SaleResult<SaleEvent> {
        self.access.require_admin(caller)?;
        let id = asset.id;
        let rate = asset.rate;
        self.assets.add(asset)?;
        Ok(SaleEvent::AllowedAssetAdded { asset: id, rate })
    }

    pub fn remove_allowed_asset(
        &mut self,
        caller: &Address,
        id: &AssetId,
    ) -> SaleResult<SaleEvent> {
        self.access.require_admin(caller)?;
        self.assets.remove(id)?;
        Ok(SaleEvent::AllowedAssetRemoved { asset: *id })
    }

    /// Replace the vesting parameters, each field individually validated.
    pub fn update_vesting_config(
        &mut self,
        caller: &Address,
        vesting_duration: Timestamp,
        purchase_delay: Timestamp,
        max_user_cap: Amount,
    ) -> SaleResult<SaleEvent> {
        self.access.require_admin(caller)?;
        let updated = VestingConfig {
            vesting_duration,
            purchase_delay,
            max_user_cap,
        };
        updated.validate()?;
        self.vesting = updated;
        Ok(SaleEvent::VestingConfigUpdated {
            vesting_duration,
            purchase_delay,
            max_user_cap,
        })
    }

    pub fn update_treasury(
        &mut self,
        caller: &Address,
        new_treasury: Address,
    ) -> SaleResult<SaleEvent> {
        self.access.require_admin(caller)?;
        if new_treasury.is_zero() {
            return Err(SaleError::ZeroAddress);
        }
        let old_treasury = self.treasury;
        self.treasury = new_treasury;
        Ok(SaleEvent::TreasuryUpdated {
            old_treasury,
            new_treasury,
        })
    }

    pub fn pause(&mut self, caller: &Address) -> SaleResult<SaleEvent> {
        self.access.pause(caller)?;
        Ok(SaleEvent::SalePaused { by: *caller })
    }

    pub fn unpause(&mut self, caller: &Address) -> SaleResult<SaleEvent> {
        self.access.unpause(caller)?;
        Ok(SaleEvent::SaleUnpaused { by: *caller })
    }

    pub fn set_governor(&mut self, caller: &Address, governor: Address) -> SaleResult<()> {
        self.access.set_governor(caller, governor)?;
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> SaleResult<()> {
        self.access.transfer_ownership(caller, new_owner)?;
        Ok(())
    }
}
