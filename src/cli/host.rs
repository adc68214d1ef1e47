use clap::Subcommand;

use super::account::lookup;
use super::session::Session;
use crate::account::AccountAddress;
use crate::address::Address;
use crate::error::{RegistryError, Result};
use crate::host::Host;

#[derive(Subcommand, Debug, Clone)]
pub enum HostCommands {
    /// Create the registry with an administrator
    Init {
        /// Administrator (defaults to the key file's address)
        #[arg(long)]
        admin: Option<Address>,
        #[arg(long)]
        key: Option<String>,
    },
    /// Deploy and activate a new account
    Register {
        #[arg(long)]
        owner: Option<Address>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: Option<String>,
    },
    /// Activate an existing account record
    Import {
        #[arg(long)]
        account: AccountAddress,
    },
    /// Ban an active owner (administrator only)
    Ban {
        #[arg(long)]
        owner: Address,
        #[arg(long)]
        key: Option<String>,
    },
    /// Stop tracking an owner (administrator only)
    Remove {
        #[arg(long)]
        owner: Address,
        #[arg(long)]
        key: Option<String>,
    },
    /// Move a registry entry to the account's current owner (that owner only)
    UpdateKey {
        #[arg(long)]
        owner: Address,
        #[arg(long)]
        key: Option<String>,
    },
    /// Name of the active account held by an owner
    WhoIs {
        #[arg(long)]
        owner: Address,
    },
    /// Active owners using a name
    Resolve {
        #[arg(long)]
        name: String,
    },
    /// Registry state of an owner
    Status {
        #[arg(long)]
        owner: Address,
    },
}

pub fn handle_host_command(session: &mut Session, cmd: HostCommands) -> Result<()> {
    match cmd {
        HostCommands::Init { admin, key } => {
            if session.host.is_some() {
                return Err(RegistryError::Config("registry already initialized".to_string()));
            }
            let admin = match admin {
                Some(admin) => admin,
                None => session.caller(key.as_deref())?,
            };
            session.host = Some(Host::new(admin));
            println!("Registry initialized, administrator {}", admin);
        }
        HostCommands::Register { owner, name, key } => {
            let owner = match owner {
                Some(owner) => owner,
                None => session.caller(key.as_deref())?,
            };
            let (host, accounts) = session.host_and_accounts()?;
            let event = host.register_account(accounts, owner, name)?;
            println!("{}", event);
        }
        HostCommands::Import { account } => {
            let record = lookup(session, &account)?;
            let event = session.host_mut()?.import_account(&record)?;
            println!("{}", event);
        }
        HostCommands::Ban { owner, key } => {
            let caller = session.caller(key.as_deref())?;
            let event = session.host_mut()?.ban_account(&owner, &caller)?;
            println!("{}", event);
        }
        HostCommands::Remove { owner, key } => {
            let caller = session.caller(key.as_deref())?;
            let event = session.host_mut()?.remove_account(&owner, &caller)?;
            println!("{}", event);
        }
        HostCommands::UpdateKey { owner, key } => {
            let caller = session.caller(key.as_deref())?;
            let event = session.host_mut()?.update_key(&owner, &caller)?;
            println!("{}", event);
        }
        HostCommands::WhoIs { owner } => {
            println!("{}", session.host()?.who_is(&owner)?);
        }
        HostCommands::Resolve { name } => {
            for owner in session.host()?.owners_named(&name)? {
                println!("{}", owner);
            }
        }
        HostCommands::Status { owner } => {
            println!("{}", session.host()?.status(&owner));
        }
    }
    Ok(())
}
