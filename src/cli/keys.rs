use std::path::Path;

use crate::crypto::KeyPair;
use crate::error::{RegistryError, Result};

/// Generate a new identity and write it to `path`.
pub fn handle_keygen(path: &str) -> Result<()> {
    let path = Path::new(path);
    if path.exists() {
        return Err(RegistryError::Config(format!(
            "file '{}' already exists, refusing to overwrite",
            path.display()
        )));
    }

    let keypair = KeyPair::new();
    keypair.save(path)?;
    println!("Identity saved to '{}'", path.display());
    println!("Address: {}", keypair.address());
    Ok(())
}
