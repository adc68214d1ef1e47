//! Owner addresses and the membership set the registry is built on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Opaque 32-byte identifier of an authenticated caller.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Address {
    /// Sentinel that never identifies a real owner.
    pub const ZERO: Address = Address([0u8; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| RegistryError::InvalidAddress(format!("{}: {}", s, e)))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| RegistryError::InvalidAddress(format!("{}: expected 32 bytes", s)))?;
        Ok(Address(bytes))
    }
}

/// Membership-only set of addresses.
///
/// Supports add, remove and existence checks. Both mutations are idempotent.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressSet {
    members: BTreeSet<Address>,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, address: Address) {
        self.members.insert(address);
    }

    pub fn remove(&mut self, address: &Address) {
        self.members.remove(address);
    }

    pub fn has(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in address order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}

impl FromIterator<Address> for AddressSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn test_add_remove_idempotent() {
        let mut set = AddressSet::new();
        set.add(addr(1));
        set.add(addr(1));
        assert!(set.has(&addr(1)));
        assert_eq!(set.len(), 1);

        set.remove(&addr(1));
        assert!(!set.has(&addr(1)));
        set.remove(&addr(1));
        assert!(set.is_empty());
    }

    #[test]
    fn test_has_is_pure() {
        let mut set = AddressSet::new();
        set.add(addr(2));
        assert!(!set.has(&addr(3)));
        assert!(set.has(&addr(2)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_address_hex_parsing() {
        let a = addr(0xab);
        let text = a.to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.parse::<Address>().unwrap(), a);
        assert_eq!(text.trim_start_matches("0x").parse::<Address>().unwrap(), a);

        assert!("0x1234".parse::<Address>().is_err());
        assert!("not-hex".parse::<Address>().is_err());
    }

    #[test]
    fn test_zero_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!addr(1).is_zero());
    }
}
