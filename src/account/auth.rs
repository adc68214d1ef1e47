//! Caller authorization.
//!
//! Callers arrive already authenticated; authorization is a plain equality
//! check between the supplied address and the one on record.

use crate::address::Address;
use crate::error::{Operation, RegistryError, Result};

/// Fail with `Unauthorized` unless `caller` is `owner`.
pub fn authorize(op: Operation, owner: &Address, caller: &Address) -> Result<()> {
    if owner == caller {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized { op, caller: *caller })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize() {
        let owner = Address::from_bytes([1u8; 32]);
        let other = Address::from_bytes([2u8; 32]);

        assert!(authorize(Operation::BanAccount, &owner, &owner).is_ok());
        match authorize(Operation::BanAccount, &owner, &other) {
            Err(RegistryError::Unauthorized { op, caller }) => {
                assert_eq!(op, Operation::BanAccount);
                assert_eq!(caller, other);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
