//! Role set and pause flag.
//!
//! Two roles exist: the owner (set at construction, transferable) and an
//! optional delegated governor, settable exactly once by the owner and used
//! for day-to-day operational calls. Every privileged entry point invokes
//! one of the `require_*` guards first; a failed guard mutates nothing.

use lib_types::Address;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// Owner/governor role assignment plus the pause flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    governor: Option<Address>,
    paused: bool,
}

impl AccessControl {
    /// Create with the given owner, no governor, unpaused.
    pub fn new(owner: Address) -> LedgerResult<Self> {
        if owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        Ok(Self {
            owner,
            governor: None,
            paused: false,
        })
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn governor(&self) -> Option<Address> {
        self.governor
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Owner or governor
    pub fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.owner || self.governor.as_ref() == Some(caller)
    }

    pub fn require_owner(&self, caller: &Address) -> LedgerResult<()> {
        if *caller != self.owner {
            return Err(LedgerError::Unauthorized(format!(
                "caller {} is not the owner",
                caller
            )));
        }
        Ok(())
    }

    pub fn require_admin(&self, caller: &Address) -> LedgerResult<()> {
        if !self.is_admin(caller) {
            return Err(LedgerError::Unauthorized(format!(
                "caller {} is not owner or governor",
                caller
            )));
        }
        Ok(())
    }

    /// Fails with `Paused` while the pause flag is set.
    pub fn ensure_active(&self) -> LedgerResult<()> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    /// Owner-only ownership handover.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> LedgerResult<()> {
        self.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.owner = new_owner;
        Ok(())
    }

    /// Owner-only, one-shot governor delegation.
    pub fn set_governor(&mut self, caller: &Address, governor: Address) -> LedgerResult<()> {
        self.require_owner(caller)?;
        if governor.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if self.governor.is_some() {
            return Err(LedgerError::GovernorAlreadySet);
        }
        self.governor = Some(governor);
        Ok(())
    }

    /// Admin-only pause. Blocks balance-mutating entry points.
    pub fn pause(&mut self, caller: &Address) -> LedgerResult<()> {
        self.require_admin(caller)?;
        self.paused = true;
        Ok(())
    }

    /// Admin-only unpause. Exempt from the pause gate itself.
    pub fn unpause(&mut self, caller: &Address) -> LedgerResult<()> {
        self.require_admin(caller)?;
        self.paused = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    #[test]
    fn test_owner_and_admin_checks() {
        let access = AccessControl::new(addr(1)).unwrap();
        assert!(access.require_owner(&addr(1)).is_ok());
        assert!(matches!(
            access.require_owner(&addr(2)),
            Err(LedgerError::Unauthorized(_))
        ));
        assert!(access.is_admin(&addr(1)));
        assert!(!access.is_admin(&addr(2)));
    }

    #[test]
    fn test_governor_set_once() {
        let mut access = AccessControl::new(addr(1)).unwrap();

        // only owner can delegate
        assert!(matches!(
            access.set_governor(&addr(2), addr(3)),
            Err(LedgerError::Unauthorized(_))
        ));

        access.set_governor(&addr(1), addr(2)).unwrap();
        assert!(access.is_admin(&addr(2)));

        assert_eq!(
            access.set_governor(&addr(1), addr(3)),
            Err(LedgerError::GovernorAlreadySet)
        );
    }

    #[test]
    fn test_pause_cycle() {
        let mut access = AccessControl::new(addr(1)).unwrap();
        assert!(access.ensure_active().is_ok());

        assert!(matches!(
            access.pause(&addr(9)),
            Err(LedgerError::Unauthorized(_))
        ));

        access.pause(&addr(1)).unwrap();
        assert_eq!(access.ensure_active(), Err(LedgerError::Paused));

        // unpause works while paused
        access.unpause(&addr(1)).unwrap();
        assert!(access.ensure_active().is_ok());
    }

    #[test]
    fn test_ownership_transfer() {
        let mut access = AccessControl::new(addr(1)).unwrap();
        access.transfer_ownership(&addr(1), addr(5)).unwrap();
        assert_eq!(access.owner(), addr(5));
        assert!(access.require_owner(&addr(1)).is_err());
    }

    #[test]
    fn test_zero_addresses_rejected() {
        assert!(AccessControl::new(Address::zero()).is_err());
        let mut access = AccessControl::new(addr(1)).unwrap();
        assert_eq!(
            access.set_governor(&addr(1), Address::zero()),
            Err(LedgerError::ZeroAddress)
        );
        assert_eq!(
            access.transfer_ownership(&addr(1), Address::zero()),
            Err(LedgerError::ZeroAddress)
        );
    }
}
