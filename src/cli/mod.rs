pub mod account;
pub mod host;
pub mod keys;
pub mod session;

use clap::{Parser, Subcommand};

use crate::config::RegistryConfig;
use crate::error::Result;
use session::Session;

#[derive(Parser)]
#[command(name = "compass-registry")]
#[command(about = "Compass account registry CLI", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "registry.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a caller identity
    Keygen {
        /// Output file (defaults to the configured key file)
        #[arg(long)]
        out: Option<String>,
    },
    /// Account record operations
    Account {
        #[command(subcommand)]
        cmd: account::AccountCommands,
    },
    /// Registry operations
    Host {
        #[command(subcommand)]
        cmd: host::HostCommands,
    },
}

/// Run one command against the configured database.
pub fn run(command: Commands, config: &RegistryConfig) -> Result<()> {
    let mut session = Session::open(config)?;
    execute(&mut session, command)
}

/// Dispatch to the handlers, persisting only if the command succeeds.
pub fn execute(session: &mut Session, command: Commands) -> Result<()> {
    match command {
        Commands::Keygen { out } => {
            // Nothing to persist
            return keys::handle_keygen(out.as_deref().unwrap_or(session.default_key_file()));
        }
        Commands::Account { cmd } => account::handle_account_command(session, cmd)?,
        Commands::Host { cmd } => host::handle_host_command(session, cmd)?,
    }
    session.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::crypto::KeyPair;
    use crate::error::ErrorKind;
    use crate::host::RegistryStatus;
    use crate::storage::Storage;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn key_file(tag: &str) -> (PathBuf, Address) {
        let path = std::env::temp_dir().join(format!("compass_cli_{}_{}.json", tag, std::process::id()));
        let keypair = KeyPair::new();
        keypair.save(&path).unwrap();
        (path, keypair.address())
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["compass-registry"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_key_rotation_flow_survives_reload() {
        let storage = Arc::new(Storage::temporary().unwrap());
        let config = RegistryConfig::default();
        let (admin_path, admin) = key_file("admin");
        let (owner_path, owner) = key_file("owner");
        let (next_path, next) = key_file("next");
        let admin_key = admin_path.to_str().unwrap();
        let owner_key = owner_path.to_str().unwrap();
        let next_key = next_path.to_str().unwrap();
        let owner_hex = owner.to_string();
        let next_hex = next.to_string();

        let mut session = Session::with_storage(storage.clone(), &config).unwrap();
        execute(&mut session, parse(&["host", "init", "--key", admin_key])).unwrap();
        execute(&mut session, parse(&["account", "deploy", "--name", "Jain", "--key", owner_key])).unwrap();
        let account = session.accounts.addresses()[0].to_string();
        execute(&mut session, parse(&["host", "import", "--account", account.as_str()])).unwrap();
        execute(
            &mut session,
            parse(&[
                "account",
                "transfer",
                "--account",
                account.as_str(),
                "--new-owner",
                next_hex.as_str(),
                "--key",
                owner_key,
            ]),
        )
        .unwrap();

        // Reload between steps, as separate invocations would
        let mut session = Session::with_storage(storage.clone(), &config).unwrap();
        assert_eq!(session.host().unwrap().admin(), admin);
        assert_eq!(session.host().unwrap().status(&owner), RegistryStatus::Active);

        let err = execute(
            &mut session,
            parse(&["host", "update-key", "--owner", owner_hex.as_str(), "--key", admin_key]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        execute(
            &mut session,
            parse(&["host", "update-key", "--owner", owner_hex.as_str(), "--key", next_key]),
        )
        .unwrap();

        let session = Session::with_storage(storage, &config).unwrap();
        let host = session.host().unwrap();
        assert_eq!(host.status(&owner), RegistryStatus::Untracked);
        assert_eq!(host.status(&next), RegistryStatus::Active);
        assert_eq!(host.who_is(&next).unwrap(), "Jain");

        for path in [&admin_path, &owner_path, &next_path] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn test_failed_command_is_not_persisted() {
        let storage = Arc::new(Storage::temporary().unwrap());
        let config = RegistryConfig::default();
        let (admin_path, _) = key_file("admin2");
        let (owner_path, owner) = key_file("owner2");
        let admin_key = admin_path.to_str().unwrap();
        let owner_key = owner_path.to_str().unwrap();
        let owner_hex = owner.to_string();

        let mut session = Session::with_storage(storage.clone(), &config).unwrap();
        let err = execute(&mut session, parse(&["host", "status", "--owner", owner_hex.as_str()])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);

        execute(&mut session, parse(&["host", "init", "--key", admin_key])).unwrap();
        execute(&mut session, parse(&["host", "register", "--name", "Jain", "--key", owner_key])).unwrap();

        // Owner cannot ban themselves
        let err = execute(
            &mut session,
            parse(&["host", "ban", "--owner", owner_hex.as_str(), "--key", owner_key]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        execute(&mut session, parse(&["host", "ban", "--owner", owner_hex.as_str(), "--key", admin_key])).unwrap();
        let err = execute(&mut session, parse(&["host", "register", "--name", "Jain", "--key", owner_key]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Banned);

        let session = Session::with_storage(storage, &config).unwrap();
        assert_eq!(session.host().unwrap().status(&owner), RegistryStatus::Banned);
        assert_eq!(session.accounts.len(), 1);

        let _ = std::fs::remove_file(&admin_path);
        let _ = std::fs::remove_file(&owner_path);
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(Cli::try_parse_from(["compass-registry", "host", "status", "--owner", "0x1234"]).is_err());
        assert!(Cli::try_parse_from(["compass-registry", "host", "import", "--account", "nope"]).is_err());
    }
}
