//! Owner and whitelister principals.
//!
//! Both roles live in one [`Roles`] record that the pallet loads, mutates
//! through the methods below and writes back. `None` is the renounced state;
//! once a role is renounced nobody can pass its check again.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// Failure of a role check or role handover.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum RoleError {
    NotOwner,
    NotWhitelister,
    ZeroAddress,
}

#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, RuntimeDebug)]
pub struct Roles<AccountId> {
    pub owner: Option<AccountId>,
    pub whitelister: Option<AccountId>,
}

impl<AccountId> Default for Roles<AccountId> {
    fn default() -> Self {
        Self { owner: None, whitelister: None }
    }
}

impl<AccountId: Clone + PartialEq> Roles<AccountId> {
    pub fn new(owner: Option<AccountId>, whitelister: Option<AccountId>) -> Self {
        Self { owner, whitelister }
    }

    pub fn ensure_owner(&self, who: &AccountId) -> Result<(), RoleError> {
        match &self.owner {
            Some(owner) if owner == who => Ok(()),
            _ => Err(RoleError::NotOwner),
        }
    }

    pub fn ensure_whitelister(&self, who: &AccountId) -> Result<(), RoleError> {
        match &self.whitelister {
            Some(whitelister) if whitelister == who => Ok(()),
            _ => Err(RoleError::NotWhitelister),
        }
    }

    /// Hands ownership from `caller` to `new_owner`, returning the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
        zero: &AccountId,
    ) -> Result<AccountId, RoleError> {
        self.ensure_owner(caller)?;
        if &new_owner == zero {
            return Err(RoleError::ZeroAddress);
        }
        Ok(self.owner.replace(new_owner).unwrap_or_else(|| caller.clone()))
    }

    pub fn renounce_ownership(&mut self, caller: &AccountId) -> Result<AccountId, RoleError> {
        self.ensure_owner(caller)?;
        Ok(self.owner.take().unwrap_or_else(|| caller.clone()))
    }

    /// Hands the whitelister role from `caller` to `new_whitelister`. The old
    /// holder loses the role in the same write the new one gains it.
    pub fn transfer_whitelister(
        &mut self,
        caller: &AccountId,
        new_whitelister: AccountId,
        zero: &AccountId,
    ) -> Result<AccountId, RoleError> {
        self.ensure_whitelister(caller)?;
        if &new_whitelister == zero {
            return Err(RoleError::ZeroAddress);
        }
        Ok(self.whitelister.replace(new_whitelister).unwrap_or_else(|| caller.clone()))
    }

    pub fn renounce_whitelister(&mut self, caller: &AccountId) -> Result<AccountId, RoleError> {
        self.ensure_whitelister(caller)?;
        Ok(self.whitelister.take().unwrap_or_else(|| caller.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: u64 = 0;

    fn roles() -> Roles<u64> {
        Roles::new(Some(1), Some(2))
    }

    #[test]
    fn checks_match_only_the_holder() {
        let roles = roles();
        assert_eq!(roles.ensure_owner(&1), Ok(()));
        assert_eq!(roles.ensure_owner(&2), Err(RoleError::NotOwner));
        assert_eq!(roles.ensure_whitelister(&2), Ok(()));
        assert_eq!(roles.ensure_whitelister(&1), Err(RoleError::NotWhitelister));
    }

    #[test]
    fn whitelister_handover_has_no_overlap() {
        let mut roles = roles();
        assert_eq!(roles.transfer_whitelister(&2, 3, &ZERO), Ok(2));
        assert_eq!(roles.ensure_whitelister(&2), Err(RoleError::NotWhitelister));
        assert_eq!(roles.ensure_whitelister(&3), Ok(()));
        assert_eq!(roles.owner, Some(1));
    }

    #[test]
    fn handover_to_zero_is_rejected_without_change() {
        let mut roles = roles();
        assert_eq!(roles.transfer_whitelister(&2, ZERO, &ZERO), Err(RoleError::ZeroAddress));
        assert_eq!(roles.transfer_ownership(&1, ZERO, &ZERO), Err(RoleError::ZeroAddress));
        assert_eq!(roles, self::roles());
    }

    #[test]
    fn unauthorized_caller_checked_before_zero_target() {
        let mut roles = roles();
        assert_eq!(roles.transfer_whitelister(&1, ZERO, &ZERO), Err(RoleError::NotWhitelister));
        assert_eq!(roles.transfer_ownership(&2, ZERO, &ZERO), Err(RoleError::NotOwner));
    }

    #[test]
    fn renounced_roles_stay_renounced() {
        let mut roles = roles();
        assert_eq!(roles.renounce_whitelister(&2), Ok(2));
        assert_eq!(roles.whitelister, None);
        assert_eq!(roles.renounce_whitelister(&2), Err(RoleError::NotWhitelister));
        assert_eq!(roles.transfer_whitelister(&2, 5, &ZERO), Err(RoleError::NotWhitelister));
        // owner untouched
        assert_eq!(roles.ensure_owner(&1), Ok(()));

        assert_eq!(roles.renounce_ownership(&1), Ok(1));
        assert_eq!(roles, Roles::new(None, None));
    }
}
