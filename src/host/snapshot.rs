use serde::{Deserialize, Serialize};

use crate::account::AccountAddress;
use crate::address::Address;

/// Persistable form of a [`Host`](super::Host).
///
/// Account records are stored separately; the snapshot only names them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HostSnapshot {
    pub admin: Address,
    pub active: Vec<Address>,
    pub banned: Vec<Address>,
    pub references: Vec<(Address, AccountAddress)>,
}
