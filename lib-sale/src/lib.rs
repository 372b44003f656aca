//! Public sale engine.
//!
//! Exchanges externally supplied payment assets for ledger units at
//! configurable rates, enforces purchase timing and caps, locks purchased
//! tokens under a vesting schedule, and permanently burns unsold supply at
//! finalization.
//!
//! # Key Types
//!
//! - [`SaleEngine`]: the per-sale state machine
//!   (`NotStarted -> Active -> Ended -> Finalized`)
//! - [`AllowedAsset`] / [`AssetRegistry`]: payment assets and rates
//! - [`VestingConfig`] / [`PurchaseRecord`]: lock bookkeeping
//! - [`PaymentLedger`]: the external payment-asset collaborator

pub mod assets;
pub mod engine;
pub mod errors;
pub mod events;
pub mod payment;
pub mod vesting;

pub use assets::{AllowedAsset, AssetRegistry};
pub use engine::{PurchaseOutcome, SaleConfig, SaleEngine, SaleWindow};
pub use errors::{PaymentError, SaleError, SaleResult};
pub use events::SaleEvent;
pub use payment::{InMemoryPaymentLedger, PaymentLedger};
pub use vesting::{PurchaseRecord, VestingConfig, MAX_PURCHASE_DELAY};
