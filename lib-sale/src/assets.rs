//! Allowed payment assets.

use std::collections::HashMap;

use lib_types::{Amount, AssetId};
use serde::{Deserialize, Serialize};

use crate::errors::{SaleError, SaleResult};

/// A payment asset the sale accepts, with its exchange rate.
///
/// The rate is payment-units per ledger-unit, fixed-point 1e18. Symbol,
/// name and decimals are display metadata declared by the deployer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedAsset {
    pub id: AssetId,
    /// Payment-units per ledger-unit, scale 1e18
    pub rate: Amount,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// Registry of allowed payment assets, keyed by asset id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, AllowedAsset>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset. Duplicate ids and zero rates are rejected.
    pub fn add(&mut self, asset: AllowedAsset) -> SaleResult<()> {
        if asset.rate == 0 {
            return Err(SaleError::ZeroRate);
        }
        if self.assets.contains_key(&asset.id) {
            return Err(SaleError::AssetAlreadyAllowed(asset.id));
        }
        self.assets.insert(asset.id, asset);
        Ok(())
    }

    pub fn remove(&mut self, id: &AssetId) -> SaleResult<AllowedAsset> {
        self.assets
            .remove(id)
            .ok_or(SaleError::AssetNotAllowed(*id))
    }

    pub fn get(&self, id: &AssetId) -> SaleResult<&AllowedAsset> {
        self.assets.get(id).ok_or(SaleError::AssetNotAllowed(*id))
    }

    pub fn is_allowed(&self, id: &AssetId) -> bool {
        self.assets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::SCALE;

    fn asset(id: u8, rate: Amount) -> AllowedAsset {
        AllowedAsset {
            id: AssetId::new([id; 32]),
            rate,
            symbol: "MUSD".to_string(),
            name: "Mock USD".to_string(),
            decimals: 6,
        }
    }

    #[test]
    fn test_add_get_remove() {
        let mut registry = AssetRegistry::new();
        registry.add(asset(1, SCALE / 1_000)).unwrap();

        assert!(registry.is_allowed(&AssetId::new([1u8; 32])));
        assert_eq!(
            registry.get(&AssetId::new([1u8; 32])).unwrap().rate,
            SCALE / 1_000
        );

        registry.remove(&AssetId::new([1u8; 32])).unwrap();
        assert!(!registry.is_allowed(&AssetId::new([1u8; 32])));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut registry = AssetRegistry::new();
        assert_eq!(registry.add(asset(1, 0)), Err(SaleError::ZeroRate));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = AssetRegistry::new();
        registry.add(asset(1, 1)).unwrap();
        assert!(matches!(
            registry.add(asset(1, 2)),
            Err(SaleError::AssetAlreadyAllowed(_))
        ));
    }

    #[test]
    fn test_missing_lookups_fail() {
        let mut registry = AssetRegistry::new();
        let id = AssetId::new([9u8; 32]);
        assert!(matches!(registry.get(&id), Err(SaleError::AssetNotAllowed(_))));
        assert!(matches!(registry.remove(&id), Err(SaleError::AssetNotAllowed(_))));
    }
}
