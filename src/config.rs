use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegistryConfig {
    pub node: NodeConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeConfig {
    pub log_level: String,
    /// Key file used when a command does not name one
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

fn default_key_file() -> String {
    "identity.json".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig {
                log_level: "info".to_string(),
                key_file: default_key_file(),
            },
            storage: StorageConfig {
                db_path: "./data/registry".to_string(),
            },
        }
    }
}

impl RegistryConfig {
    // Runs before the subscriber is installed, so report on stderr
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using Defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            eprintln!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [node]
            log_level = "debug"

            [storage]
            db_path = "/tmp/registry"
            "#,
        )
        .unwrap();
        assert_eq!(config.node.log_level, "debug");
        assert_eq!(config.node.key_file, "identity.json");
        assert_eq!(config.storage.db_path, "/tmp/registry");
    }

    #[test]
    fn test_load_or_default_writes_file() {
        let path = std::env::temp_dir().join(format!("compass_registry_{}.toml", std::process::id()));
        let path_str = path.to_str().unwrap();
        let _ = std::fs::remove_file(&path);

        let created = RegistryConfig::load_or_default(path_str);
        assert_eq!(created, RegistryConfig::default());
        assert!(path.exists());

        let reloaded = RegistryConfig::load_or_default(path_str);
        assert_eq!(reloaded, created);
        let _ = std::fs::remove_file(&path);
    }
}
