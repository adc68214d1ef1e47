//! Notifications emitted by registry transitions

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::account::AccountAddress;
use crate::address::Address;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// An account was registered or imported and is now active.
    ActivatedAccount {
        owner: Address,
        account_reference: AccountAddress,
    },
    /// An active account was moved to the banned set.
    BannedAccount {
        owner: Address,
        account_reference: AccountAddress,
    },
    /// An owner was dropped from both sets.
    RemovedAccount {
        owner: Address,
        account_reference: AccountAddress,
    },
    /// Registry key moved to the account's current owner.
    UpdatedKey {
        previous: Address,
        owner: Address,
        account_reference: AccountAddress,
    },
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::ActivatedAccount { .. } => "ActivatedAccount",
            HostEvent::BannedAccount { .. } => "BannedAccount",
            HostEvent::RemovedAccount { .. } => "RemovedAccount",
            HostEvent::UpdatedKey { .. } => "UpdatedKey",
        }
    }

    pub fn owner(&self) -> Address {
        match self {
            HostEvent::ActivatedAccount { owner, .. }
            | HostEvent::BannedAccount { owner, .. }
            | HostEvent::RemovedAccount { owner, .. }
            | HostEvent::UpdatedKey { owner, .. } => *owner,
        }
    }

    pub fn account_reference(&self) -> AccountAddress {
        match self {
            HostEvent::ActivatedAccount { account_reference, .. }
            | HostEvent::BannedAccount { account_reference, .. }
            | HostEvent::RemovedAccount { account_reference, .. }
            | HostEvent::UpdatedKey { account_reference, .. } => *account_reference,
        }
    }

    /// Publish to the log and hand the event back to the caller.
    pub(crate) fn emit(self) -> Self {
        info!(
            event = self.name(),
            owner = %self.owner(),
            account = %self.account_reference(),
            "registry event"
        );
        self
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::UpdatedKey { previous, owner, account_reference } => write!(
                f,
                "UpdatedKey {{ previous: {}, owner: {}, account_reference: {} }}",
                previous, owner, account_reference
            ),
            _ => write!(
                f,
                "{} {{ owner: {}, account_reference: {} }}",
                self.name(),
                self.owner(),
                self.account_reference()
            ),
        }
    }
}
