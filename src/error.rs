use std::fmt;

use thiserror::Error;

use crate::account::AccountAddress;
use crate::address::Address;

/// The call that produced an error, rendered as `Type::method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ChangeName,
    ChangeOwner,
    RegisterAccount,
    ImportAccount,
    BanAccount,
    RemoveAccount,
    UpdateKey,
    WhoIs,
    RestoreSnapshot,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ChangeName => "Account::change_name",
            Operation::ChangeOwner => "Account::change_owner",
            Operation::RegisterAccount => "Host::register_account",
            Operation::ImportAccount => "Host::import_account",
            Operation::BanAccount => "Host::ban_account",
            Operation::RemoveAccount => "Host::remove_account",
            Operation::UpdateKey => "Host::update_key",
            Operation::WhoIs => "Host::who_is",
            Operation::RestoreSnapshot => "Host::from_snapshot",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{op}: message sender {caller} not an owner")]
    Unauthorized { op: Operation, caller: Address },
    #[error("{op}: account already active ({owner})")]
    AlreadyActive { op: Operation, owner: Address },
    #[error("{op}: account was banned ({owner})")]
    Banned { op: Operation, owner: Address },
    #[error("{op}: account not active ({owner})")]
    NotActive { op: Operation, owner: Address },
    #[error("{op}: account not found ({owner})")]
    NotFound { op: Operation, owner: Address },
    #[error("{op}: invalid argument: {reason}")]
    InvalidArgument { op: Operation, reason: String },
    #[error("No account record at {0}")]
    UnknownAccount(AccountAddress),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Account record lock poisoned")]
    LockPoisoned,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless view of [`RegistryError`] for callers that only branch on the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    AlreadyActive,
    Banned,
    NotActive,
    NotFound,
    InvalidArgument,
    Infrastructure,
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Unauthorized { .. } => ErrorKind::Unauthorized,
            RegistryError::AlreadyActive { .. } => ErrorKind::AlreadyActive,
            RegistryError::Banned { .. } => ErrorKind::Banned,
            RegistryError::NotActive { .. } => ErrorKind::NotActive,
            RegistryError::NotFound { .. } | RegistryError::UnknownAccount(_) => ErrorKind::NotFound,
            RegistryError::InvalidArgument { .. } | RegistryError::InvalidAddress(_) => {
                ErrorKind::InvalidArgument
            }
            RegistryError::LockPoisoned
            | RegistryError::Storage(_)
            | RegistryError::Serialization(_)
            | RegistryError::Config(_)
            | RegistryError::Io(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<sled::Error> for RegistryError {
    fn from(err: sled::Error) -> Self {
        RegistryError::Storage(err.to_string())
    }
}

impl From<bincode::Error> for RegistryError {
    fn from(err: bincode::Error) -> Self {
        RegistryError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_operation() {
        let owner = Address::from_bytes([7u8; 32]);
        let err = RegistryError::AlreadyActive { op: Operation::ImportAccount, owner };
        let msg = err.to_string();
        assert!(msg.starts_with("Host::import_account: account already active"));
        assert_eq!(err.kind(), ErrorKind::AlreadyActive);
    }

    #[test]
    fn test_infrastructure_kind() {
        assert_eq!(RegistryError::LockPoisoned.kind(), ErrorKind::Infrastructure);
        assert_eq!(
            RegistryError::InvalidAddress("zz".into()).kind(),
            ErrorKind::InvalidArgument
        );
    }
}
