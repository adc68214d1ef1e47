use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::account::AccountStore;
use crate::address::Address;
use crate::config::RegistryConfig;
use crate::crypto::KeyPair;
use crate::error::{RegistryError, Result};
use crate::host::Host;
use crate::storage::Storage;

/// Persistent state loaded for one command.
pub struct Session {
    pub storage: Arc<Storage>,
    pub accounts: AccountStore,
    pub host: Option<Host>,
    default_key_file: String,
}

impl Session {
    pub fn open(config: &RegistryConfig) -> Result<Self> {
        let storage = Arc::new(Storage::new(&config.storage.db_path)?);
        Self::with_storage(storage, config)
    }

    pub fn with_storage(storage: Arc<Storage>, config: &RegistryConfig) -> Result<Self> {
        let accounts = AccountStore::with_storage(storage.clone())?;
        let host = match storage.load_host()? {
            Some(snapshot) => Some(Host::from_snapshot(&snapshot, &accounts)?),
            None => None,
        };
        debug!(accounts = accounts.len(), initialized = host.is_some(), "session opened");

        Ok(Session {
            storage,
            accounts,
            host,
            default_key_file: config.node.key_file.clone(),
        })
    }

    pub fn default_key_file(&self) -> &str {
        &self.default_key_file
    }

    /// Address of whoever holds the key file (the configured one by default).
    pub fn caller(&self, key_file: Option<&str>) -> Result<Address> {
        let path = key_file.unwrap_or(&self.default_key_file);
        Ok(KeyPair::load(Path::new(path))?.address())
    }

    pub fn host_mut(&mut self) -> Result<&mut Host> {
        self.host.as_mut().ok_or_else(not_initialized)
    }

    /// Registry plus the store it deploys into, borrowed together.
    pub fn host_and_accounts(&mut self) -> Result<(&mut Host, &mut AccountStore)> {
        let host = self.host.as_mut().ok_or_else(not_initialized)?;
        Ok((host, &mut self.accounts))
    }

    pub fn host(&self) -> Result<&Host> {
        self.host.as_ref().ok_or_else(not_initialized)
    }

    /// Persist the registry and flush everything to disk.
    pub fn commit(&self) -> Result<()> {
        if let Some(host) = &self.host {
            self.storage.save_host(&host.to_snapshot())?;
        }
        self.storage.flush()
    }
}

fn not_initialized() -> RegistryError {
    RegistryError::Config("registry not initialized, run `init` first".to_string())
}
