//! Liquidity pool registry.
//!
//! Pure set membership with deterministic insertion-order indexing.
//! Removal uses swap-with-last: the final entry moves into the removed
//! slot, so indices stay dense and enumeration stays stable apart from
//! that one documented move.

use lib_types::Address;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// Fee treatment for registered pool accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFeeExemption {
    /// Skip the transfer fee when a pool is the sender
    pub exempt_as_sender: bool,
    /// Skip the transfer fee when a pool is the recipient
    pub exempt_as_recipient: bool,
}

/// Set of liquidity pool addresses granted special fee treatment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPoolRegistry {
    pools: Vec<Address>,
}

impl LiquidityPoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool address. Duplicates are rejected.
    pub fn add_pool(&mut self, pool: Address) -> LedgerResult<()> {
        if pool.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if self.contains(&pool) {
            return Err(LedgerError::PoolAlreadyRegistered(pool));
        }
        self.pools.push(pool);
        Ok(())
    }

    /// Remove a pool address via swap-with-last.
    pub fn remove_pool(&mut self, pool: &Address) -> LedgerResult<()> {
        let index = self
            .pools
            .iter()
            .position(|p| p == pool)
            .ok_or(LedgerError::PoolNotRegistered(*pool))?;
        self.pools.swap_remove(index);
        Ok(())
    }

    pub fn contains(&self, pool: &Address) -> bool {
        self.pools.iter().any(|p| p == pool)
    }

    pub fn count(&self) -> usize {
        self.pools.len()
    }

    pub fn pool_at(&self, index: usize) -> Option<Address> {
        self.pools.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    #[test]
    fn test_add_and_enumerate() {
        let mut registry = LiquidityPoolRegistry::new();
        registry.add_pool(addr(1)).unwrap();
        registry.add_pool(addr(2)).unwrap();

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.pool_at(0), Some(addr(1)));
        assert_eq!(registry.pool_at(1), Some(addr(2)));
    }

    #[test]
    fn test_swap_with_last_removal() {
        let mut registry = LiquidityPoolRegistry::new();
        registry.add_pool(addr(1)).unwrap();
        registry.add_pool(addr(2)).unwrap();

        // removing the first entry moves the last into its slot
        registry.remove_pool(&addr(1)).unwrap();
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.pool_at(0), Some(addr(2)));
        assert_eq!(registry.pool_at(1), None);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = LiquidityPoolRegistry::new();
        registry.add_pool(addr(1)).unwrap();
        assert_eq!(
            registry.add_pool(addr(1)),
            Err(LedgerError::PoolAlreadyRegistered(addr(1)))
        );
    }

    #[test]
    fn test_remove_missing_rejected() {
        let mut registry = LiquidityPoolRegistry::new();
        assert_eq!(
            registry.remove_pool(&addr(1)),
            Err(LedgerError::PoolNotRegistered(addr(1)))
        );
    }
}
