//! Registry state machine
//!
//! Each owner address is in exactly one of three states: untracked, active or
//! banned. Every operation checks all of its preconditions before touching
//! state, so a rejected call changes nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use super::events::HostEvent;
use super::snapshot::HostSnapshot;
use crate::account::auth::authorize;
use crate::account::{AccountAddress, AccountRef, AccountStore};
use crate::address::{Address, AddressSet};
use crate::error::{Operation, RegistryError, Result};

/// Registry state of an owner address
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryStatus {
    Untracked,
    Active,
    Banned,
}

impl fmt::Display for RegistryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryStatus::Untracked => write!(f, "untracked"),
            RegistryStatus::Active => write!(f, "active"),
            RegistryStatus::Banned => write!(f, "banned"),
        }
    }
}

/// The account registry.
#[derive(Debug)]
pub struct Host {
    admin: Address,
    active: AddressSet,
    banned: AddressSet,
    /// Registry key -> account record
    account_reference: HashMap<Address, AccountRef>,
    /// Account record -> registry key
    keys_by_account: HashMap<AccountAddress, Address>,
}

impl Host {
    /// Create an empty registry administered by `admin`.
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            active: AddressSet::new(),
            banned: AddressSet::new(),
            account_reference: HashMap::new(),
            keys_by_account: HashMap::new(),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn active(&self) -> &AddressSet {
        &self.active
    }

    pub fn banned(&self) -> &AddressSet {
        &self.banned
    }

    pub fn status(&self, owner: &Address) -> RegistryStatus {
        if self.active.has(owner) {
            RegistryStatus::Active
        } else if self.banned.has(owner) {
            RegistryStatus::Banned
        } else {
            RegistryStatus::Untracked
        }
    }

    /// Account recorded under `owner`, active or banned.
    pub fn account(&self, owner: &Address) -> Option<&AccountRef> {
        match self.status(owner) {
            RegistryStatus::Untracked => None,
            _ => self.account_reference.get(owner),
        }
    }

    /// Deploy a fresh account for `owner` and activate it.
    pub fn register_account(
        &mut self,
        store: &mut AccountStore,
        owner: Address,
        name: impl Into<String>,
    ) -> Result<HostEvent> {
        let op = Operation::RegisterAccount;
        let result = self.ensure_registrable(op, &owner).and_then(|()| {
            let account = store.deploy(owner, name)?;
            Ok(self.activate(owner, account))
        });
        rejected(op, result)
    }

    /// Start tracking an account deployed elsewhere, keyed by its current owner.
    pub fn import_account(&mut self, account: &AccountRef) -> Result<HostEvent> {
        let op = Operation::ImportAccount;
        let result = self.check_import(account).map(|owner| self.activate(owner, account.clone()));
        rejected(op, result)
    }

    /// Move an active owner to the banned set. Admin only.
    pub fn ban_account(&mut self, owner: &Address, caller: &Address) -> Result<HostEvent> {
        let op = Operation::BanAccount;
        let result = self.check_ban(owner, caller).map(|account_reference| {
            self.active.remove(owner);
            self.banned.add(*owner);
            HostEvent::BannedAccount {
                owner: *owner,
                account_reference,
            }
            .emit()
        });
        rejected(op, result)
    }

    /// Stop tracking `owner`, wherever it is. Admin only.
    ///
    /// The account record itself is untouched.
    pub fn remove_account(&mut self, owner: &Address, caller: &Address) -> Result<HostEvent> {
        let op = Operation::RemoveAccount;
        let result = authorize(op, &self.admin, caller)
            .and_then(|()| self.tracked(op, owner).map(|account| account.address()))
            .map(|account_reference| {
                self.active.remove(owner);
                self.banned.remove(owner);
                self.account_reference.remove(owner);
                self.keys_by_account.remove(&account_reference);
                HostEvent::RemovedAccount {
                    owner: *owner,
                    account_reference,
                }
                .emit()
            });
        rejected(op, result)
    }

    /// Re-key the entry recorded under `owner` to `caller`, who must be the
    /// account's current owner. The entry stays in the same set.
    pub fn update_key(&mut self, owner: &Address, caller: &Address) -> Result<HostEvent> {
        let op = Operation::UpdateKey;
        let result = self.check_update_key(owner, caller).map(|account| {
            let account_reference = account.address();
            if owner != caller {
                let set = if self.banned.has(owner) {
                    &mut self.banned
                } else {
                    &mut self.active
                };
                set.remove(owner);
                set.add(*caller);
                self.account_reference.remove(owner);
                self.account_reference.insert(*caller, account);
                self.keys_by_account.insert(account_reference, *caller);
            }
            HostEvent::UpdatedKey {
                previous: *owner,
                owner: *caller,
                account_reference,
            }
            .emit()
        });
        rejected(op, result)
    }

    /// Current name of the active account recorded under `owner`.
    pub fn who_is(&self, owner: &Address) -> Result<String> {
        let op = Operation::WhoIs;
        if !self.active.has(owner) {
            return Err(RegistryError::NotFound { op, owner: *owner });
        }
        self.account_reference
            .get(owner)
            .ok_or(RegistryError::NotFound { op, owner: *owner })?
            .name()
    }

    /// Active owners whose account is currently called `name`, in address order.
    pub fn owners_named(&self, name: &str) -> Result<Vec<Address>> {
        let mut owners = Vec::new();
        for owner in self.active.iter() {
            if let Some(account) = self.account_reference.get(owner) {
                if account.name()? == name {
                    owners.push(*owner);
                }
            }
        }
        Ok(owners)
    }

    pub fn to_snapshot(&self) -> HostSnapshot {
        let mut references: Vec<_> = self
            .account_reference
            .iter()
            .map(|(owner, account)| (*owner, account.address()))
            .collect();
        references.sort();

        HostSnapshot {
            admin: self.admin,
            active: self.active.iter().copied().collect(),
            banned: self.banned.iter().copied().collect(),
            references,
        }
    }

    /// Rebuild a registry, resolving every reference through `store`.
    pub fn from_snapshot(snapshot: &HostSnapshot, store: &AccountStore) -> Result<Self> {
        let op = Operation::RestoreSnapshot;
        let invalid = |reason: String| RegistryError::InvalidArgument { op, reason };

        let mut host = Host::new(snapshot.admin);
        for (owner, address) in &snapshot.references {
            let account = store
                .get(address)
                .ok_or(RegistryError::NotFound { op, owner: *owner })?;
            if host.account_reference.insert(*owner, account).is_some() {
                return Err(invalid(format!("owner {} recorded twice", owner)));
            }
            if host.keys_by_account.insert(*address, *owner).is_some() {
                return Err(invalid(format!("account {} recorded twice", address)));
            }
        }

        host.active = snapshot.active.iter().copied().collect();
        host.banned = snapshot.banned.iter().copied().collect();

        if let Some(owner) = host.active.iter().find(|o| host.banned.has(o)) {
            return Err(invalid(format!("owner {} is both active and banned", owner)));
        }
        for owner in host.active.iter().chain(host.banned.iter()) {
            if !host.account_reference.contains_key(owner) {
                return Err(RegistryError::NotFound { op, owner: *owner });
            }
        }
        if host.account_reference.len() != host.active.len() + host.banned.len() {
            return Err(invalid("reference recorded for an untracked owner".to_string()));
        }
        Ok(host)
    }

    fn ensure_registrable(&self, op: Operation, owner: &Address) -> Result<()> {
        if owner.is_zero() {
            return Err(RegistryError::InvalidArgument {
                op,
                reason: "owner is the zero address".to_string(),
            });
        }
        match self.status(owner) {
            RegistryStatus::Untracked => Ok(()),
            RegistryStatus::Active => Err(RegistryError::AlreadyActive { op, owner: *owner }),
            RegistryStatus::Banned => Err(RegistryError::Banned { op, owner: *owner }),
        }
    }

    fn check_import(&self, account: &AccountRef) -> Result<Address> {
        let op = Operation::ImportAccount;
        let owner = account.owner()?;
        self.ensure_registrable(op, &owner)?;

        // Already tracked under a key that has since gone stale
        if let Some(key) = self.keys_by_account.get(&account.address()) {
            return match self.status(key) {
                RegistryStatus::Banned => Err(RegistryError::Banned { op, owner: *key }),
                _ => Err(RegistryError::AlreadyActive { op, owner: *key }),
            };
        }
        Ok(owner)
    }

    fn check_ban(&self, owner: &Address, caller: &Address) -> Result<AccountAddress> {
        let op = Operation::BanAccount;
        authorize(op, &self.admin, caller)?;
        if !self.active.has(owner) {
            return Err(RegistryError::NotActive { op, owner: *owner });
        }
        Ok(self.tracked(op, owner)?.address())
    }

    fn check_update_key(&self, owner: &Address, caller: &Address) -> Result<AccountRef> {
        let op = Operation::UpdateKey;
        let account = self.tracked(op, owner)?;
        authorize(op, &account.owner()?, caller)?;

        if owner != caller {
            // Never overwrite another tracked entry
            match self.status(caller) {
                RegistryStatus::Untracked => {}
                RegistryStatus::Active => {
                    return Err(RegistryError::AlreadyActive { op, owner: *caller })
                }
                RegistryStatus::Banned => return Err(RegistryError::Banned { op, owner: *caller }),
            }
        }
        Ok(account.clone())
    }

    fn tracked(&self, op: Operation, owner: &Address) -> Result<&AccountRef> {
        self.account(owner)
            .ok_or(RegistryError::NotFound { op, owner: *owner })
    }

    fn activate(&mut self, owner: Address, account: AccountRef) -> HostEvent {
        let account_reference = account.address();
        self.keys_by_account.insert(account_reference, owner);
        self.account_reference.insert(owner, account);
        self.active.add(owner);
        HostEvent::ActivatedAccount {
            owner,
            account_reference,
        }
        .emit()
    }
}

fn rejected<T>(op: Operation, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!(operation = %op, error = %e, "registry call rejected");
    }
    result
}
