//! Account record definitions

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use super::auth::authorize;
use crate::address::Address;
use crate::error::{Operation, RegistryError, Result};

/// Identity of an account record. Stable across owner changes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Derive the address of the `nonce`-th record deployed for `deployer`.
    pub fn derive(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"compass-account");
        hasher.update(deployer.as_bytes());
        hasher.update(nonce.to_le_bytes());
        AccountAddress(hasher.finalize().into())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountAddress {
    type Err = RegistryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Same wire form as an owner address
        let address: Address = s.parse()?;
        Ok(AccountAddress(*address.as_bytes()))
    }
}

/// A single identity record: who controls it and what it is called.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    owner: Address,
    name: String,
}

impl Account {
    /// Build a record as a deployer would. The initial owner is not validated here.
    pub fn new(owner: Address, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn change_name(&mut self, new_name: impl Into<String>, caller: &Address) -> Result<()> {
        authorize(Operation::ChangeName, &self.owner, caller)?;
        self.name = new_name.into();
        Ok(())
    }

    /// Hand control to `new_owner`. The zero address is rejected.
    pub fn change_owner(&mut self, new_owner: Address, caller: &Address) -> Result<()> {
        authorize(Operation::ChangeOwner, &self.owner, caller)?;
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidArgument {
                op: Operation::ChangeOwner,
                reason: "new owner is the zero address".to_string(),
            });
        }
        self.owner = new_owner;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn test_change_name_allowed_for_owner() {
        let mut account = Account::new(addr(2), "Jain");
        account.change_name("Ted", &addr(2)).unwrap();
        assert_eq!(account.name(), "Ted");
    }

    #[test]
    fn test_change_name_disallowed_for_non_owner() {
        let mut account = Account::new(addr(2), "Jain");
        let err = account.change_name("Ted", &addr(9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            err.to_string(),
            format!("Account::change_name: message sender {} not an owner", addr(9))
        );
        assert_eq!(account.name(), "Jain");
    }

    #[test]
    fn test_change_owner_locks_out_previous_owner() {
        let mut account = Account::new(addr(2), "Jain");
        account.change_owner(addr(9), &addr(2)).unwrap();
        assert_eq!(account.owner(), addr(9));

        assert_eq!(account.change_name("Ted", &addr(2)).unwrap_err().kind(), ErrorKind::Unauthorized);
        assert_eq!(account.change_owner(addr(2), &addr(2)).unwrap_err().kind(), ErrorKind::Unauthorized);

        // New owner can hand it back
        account.change_owner(addr(2), &addr(9)).unwrap();
        assert_eq!(account.owner(), addr(2));
    }

    #[test]
    fn test_change_owner_rejects_zero() {
        let mut account = Account::new(addr(2), "Jain");
        let err = account.change_owner(Address::ZERO, &addr(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(account.owner(), addr(2));
    }

    #[test]
    fn test_change_owner_disallowed_for_non_owner() {
        let mut account = Account::new(addr(2), "Jain");
        assert!(account.change_owner(addr(9), &addr(9)).is_err());
        assert_eq!(account.owner(), addr(2));
    }

    #[test]
    fn test_account_address_derivation() {
        let a = AccountAddress::derive(&addr(1), 0);
        assert_eq!(a, AccountAddress::derive(&addr(1), 0));
        assert_ne!(a, AccountAddress::derive(&addr(1), 1));
        assert_ne!(a, AccountAddress::derive(&addr(2), 0));
        assert_eq!(a.to_string().parse::<AccountAddress>().unwrap(), a);
    }
}
