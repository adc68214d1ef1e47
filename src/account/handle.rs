//! Shared handle to a deployed account record.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use super::types::{Account, AccountAddress};
use crate::address::Address;
use crate::error::{RegistryError, Result};

/// Reference to an account record.
///
/// The deployer, the owner and any registry tracking the account hold clones
/// of the same handle, so an ownership transfer made through one clone is seen
/// by all of them.
#[derive(Clone)]
pub struct AccountRef {
    address: AccountAddress,
    record: Arc<RwLock<Account>>,
}

impl AccountRef {
    pub(crate) fn new(address: AccountAddress, account: Account) -> Self {
        Self {
            address,
            record: Arc::new(RwLock::new(account)),
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn owner(&self) -> Result<Address> {
        Ok(self.read()?.owner())
    }

    pub fn name(&self) -> Result<String> {
        Ok(self.read()?.name().to_string())
    }

    /// Copy of the record as it stands now.
    pub fn snapshot(&self) -> Result<Account> {
        Ok(self.read()?.clone())
    }

    pub fn change_name(&self, new_name: impl Into<String>, caller: &Address) -> Result<()> {
        let new_name = new_name.into();
        self.write()?.change_name(new_name.clone(), caller)?;
        info!(account = %self.address, name = %new_name, "account renamed");
        Ok(())
    }

    pub fn change_owner(&self, new_owner: Address, caller: &Address) -> Result<()> {
        self.write()?.change_owner(new_owner, caller)?;
        info!(account = %self.address, previous = %caller, owner = %new_owner, "account ownership transferred");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Account>> {
        self.record.read().map_err(|_| RegistryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Account>> {
        self.record.write().map_err(|_| RegistryError::LockPoisoned)
    }
}

impl PartialEq for AccountRef {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for AccountRef {}

impl fmt::Debug for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountRef")
            .field("address", &self.address)
            .field("record", &self.record.read().ok().map(|a| a.clone()))
            .finish()
    }
}
