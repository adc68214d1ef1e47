use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::account::{Account, AccountAddress};
use crate::error::Result;
use crate::host::HostSnapshot;

const ACCOUNT_PREFIX: &str = "account:";
const ACCOUNT_NONCE_KEY: &str = "account_nonce";
const HOST_KEY: &str = "host";

pub struct Storage {
    pub db: sled::Db,
}

impl Storage {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Storage { db })
    }

    /// In-memory database, removed on drop.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Storage { db })
    }

    // Generic Helper: Put
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let serialized = bincode::serialize(value)?;
        self.db.insert(key.as_bytes(), serialized)?;
        Ok(())
    }

    // Generic Helper: Get
    pub fn get<T: for<'a> Deserialize<'a>>(&self, key: &str) -> Result<Option<T>> {
        match self.db.get(key.as_bytes())? {
            Some(data) => Ok(Some(bincode::deserialize(&data)?)),
            None => Ok(None),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    // --- Specific Accessors ---

    // 1. Account records
    pub fn save_account(&self, address: &AccountAddress, account: &Account) -> Result<()> {
        debug!(account = %address, "saving account record");
        self.put(&format!("{}{}", ACCOUNT_PREFIX, address), &(*address, account))
    }

    pub fn load_accounts(&self) -> Result<Vec<(AccountAddress, Account)>> {
        let mut records = Vec::new();
        for item in self.db.scan_prefix(ACCOUNT_PREFIX.as_bytes()) {
            let (_, value) = item?;
            records.push(bincode::deserialize(&value)?);
        }
        debug!(count = records.len(), "loaded account records");
        Ok(records)
    }

    /// Store a freshly deployed record together with the next nonce, atomically.
    pub fn save_deployment(&self, address: &AccountAddress, account: &Account, next_nonce: u64) -> Result<()> {
        debug!(account = %address, nonce = next_nonce, "saving deployment");
        let mut batch = sled::Batch::default();
        batch.insert(
            format!("{}{}", ACCOUNT_PREFIX, address).as_bytes(),
            bincode::serialize(&(*address, account))?,
        );
        batch.insert(ACCOUNT_NONCE_KEY.as_bytes(), bincode::serialize(&next_nonce)?);
        self.db.apply_batch(batch)?;
        Ok(())
    }

    pub fn load_account_nonce(&self) -> Result<u64> {
        Ok(self.get(ACCOUNT_NONCE_KEY)?.unwrap_or(0))
    }

    // 2. Registry
    pub fn save_host(&self, snapshot: &HostSnapshot) -> Result<()> {
        debug!(
            active = snapshot.active.len(),
            banned = snapshot.banned.len(),
            "saving host snapshot"
        );
        self.put(HOST_KEY, snapshot)
    }

    pub fn load_host(&self) -> Result<Option<HostSnapshot>> {
        self.get(HOST_KEY)
    }
}
