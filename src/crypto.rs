use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::address::Address;
use crate::error::{RegistryError, Result};

impl From<&VerifyingKey> for Address {
    fn from(key: &VerifyingKey) -> Self {
        Address::from_bytes(key.to_bytes())
    }
}

pub struct KeyPair {
    pub signing_key: SigningKey,
}

/// On-disk form of a key pair.
#[derive(Serialize, Deserialize)]
struct KeyFile {
    address: String,
    secret_key: String,
}

impl KeyPair {
    /// Generate a new Ed25519 keypair
    pub fn new() -> Self {
        let mut csprng = OsRng;
        KeyPair {
            signing_key: SigningKey::generate(&mut csprng),
        }
    }

    pub fn from_secret_hex(secret_hex: &str) -> Result<Self> {
        let bytes = hex::decode(secret_hex.trim())
            .map_err(|e| RegistryError::Config(format!("secret key is not hex: {}", e)))?;
        let secret: [u8; 32] = bytes
            .try_into()
            .map_err(|_| RegistryError::Config("secret key must be 32 bytes".to_string()))?;
        Ok(KeyPair {
            signing_key: SigningKey::from_bytes(&secret),
        })
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Address of the caller holding this key.
    pub fn address(&self) -> Address {
        Address::from(&self.signing_key.verifying_key())
    }

    /// Sign a message with the private key
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature against a message using this keypair's public key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.signing_key.verifying_key().verify(message, signature).is_ok()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = KeyFile {
            address: self.address().to_string(),
            secret_key: self.secret_hex(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: KeyFile = serde_json::from_str(&content)?;
        let keypair = Self::from_secret_hex(&file.secret_key)?;

        // Stored address must match the secret
        let stored: Address = file.address.parse()?;
        if stored != keypair.address() {
            return Err(RegistryError::Config(format!(
                "key file {} is corrupted: address does not match secret",
                path.display()
            )));
        }
        Ok(keypair)
    }
}

impl Default for KeyPair {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_hex_restores_same_address() {
        let kp = KeyPair::new();
        let restored = KeyPair::from_secret_hex(&kp.secret_hex()).unwrap();
        assert_eq!(kp.address(), restored.address());
        assert!(!kp.address().is_zero());
    }

    #[test]
    fn test_distinct_keys_distinct_addresses() {
        assert_ne!(KeyPair::new().address(), KeyPair::new().address());
    }

    #[test]
    fn test_rejects_short_secret() {
        assert!(KeyPair::from_secret_hex("abcd").is_err());
        assert!(KeyPair::from_secret_hex("zz").is_err());
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = KeyPair::new();
        let message = b"update_key";
        let signature = kp.sign(message);
        assert!(kp.verify(message, &signature));

        // Tampered message fails
        assert!(!kp.verify(b"update_keys", &signature));
        // Another key fails
        assert!(!KeyPair::new().verify(message, &signature));
    }

    #[test]
    fn test_save_and_load_key_file() {
        let path = std::env::temp_dir().join(format!("compass_key_{}.json", std::process::id()));
        let kp = KeyPair::new();
        kp.save(&path).unwrap();
        let loaded = KeyPair::load(&path).unwrap();
        assert_eq!(loaded.address(), kp.address());
        let _ = fs::remove_file(&path);
    }
}
