pub mod account;
pub mod address;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod host;
pub mod storage;

pub use account::{Account, AccountAddress, AccountRef, AccountStore};
pub use address::{Address, AddressSet};
pub use error::{ErrorKind, RegistryError};
pub use host::{Host, HostEvent, RegistryStatus};
