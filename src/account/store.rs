//! Account deployment and lookup

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::handle::AccountRef;
use super::types::{Account, AccountAddress};
use crate::address::Address;
use crate::error::Result;
use crate::storage::Storage;

/// Every account record deployed so far, by address.
///
/// Plays the external deployer: records created here exist on their own and
/// are only tracked by a registry once registered or imported into it.
pub struct AccountStore {
    accounts: HashMap<AccountAddress, AccountRef>,
    nonce: u64,
    storage: Option<Arc<Storage>>,
}

impl AccountStore {
    /// Create a new empty account store
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            nonce: 0,
            storage: None,
        }
    }

    /// Create with storage backend, loading every record it holds
    pub fn with_storage(storage: Arc<Storage>) -> Result<Self> {
        let mut accounts = HashMap::new();
        for (address, account) in storage.load_accounts()? {
            accounts.insert(address, AccountRef::new(address, account));
        }
        let nonce = storage.load_account_nonce()?;

        Ok(Self {
            accounts,
            nonce,
            storage: Some(storage),
        })
    }

    /// Deploy a fresh record owned by `owner`.
    pub fn deploy(&mut self, owner: Address, name: impl Into<String>) -> Result<AccountRef> {
        let address = AccountAddress::derive(&owner, self.nonce);
        let handle = AccountRef::new(address, Account::new(owner, name));

        // Persist before publishing so a storage failure leaves nothing behind
        if let Some(storage) = &self.storage {
            storage.save_deployment(&address, &handle.snapshot()?, self.nonce + 1)?;
        }

        self.nonce += 1;
        self.accounts.insert(address, handle.clone());
        info!(account = %address, owner = %owner, "account deployed");
        Ok(handle)
    }

    /// Write the current state of `account` back to storage, if any.
    pub fn save(&self, account: &AccountRef) -> Result<()> {
        if let Some(storage) = &self.storage {
            storage.save_account(&account.address(), &account.snapshot()?)?;
        }
        Ok(())
    }

    /// Get account by address
    pub fn get(&self, address: &AccountAddress) -> Option<AccountRef> {
        self.accounts.get(address).cloned()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Get all account addresses
    pub fn addresses(&self) -> Vec<AccountAddress> {
        let mut addresses: Vec<_> = self.accounts.keys().copied().collect();
        addresses.sort();
        addresses
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
