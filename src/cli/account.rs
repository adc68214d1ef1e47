use clap::Subcommand;

use super::session::Session;
use crate::account::{AccountAddress, AccountRef};
use crate::address::Address;
use crate::error::{RegistryError, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Deploy a standalone account record
    Deploy {
        /// Initial owner (defaults to the key file's address)
        #[arg(long)]
        owner: Option<Address>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: Option<String>,
    },
    /// Rename an account (owner only)
    Rename {
        #[arg(long)]
        account: AccountAddress,
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: Option<String>,
    },
    /// Hand an account to a new owner (owner only)
    Transfer {
        #[arg(long)]
        account: AccountAddress,
        #[arg(long)]
        new_owner: Address,
        #[arg(long)]
        key: Option<String>,
    },
    /// Show an account's owner and name
    Show {
        #[arg(long)]
        account: AccountAddress,
    },
}

pub fn handle_account_command(session: &mut Session, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::Deploy { owner, name, key } => {
            let owner = match owner {
                Some(owner) => owner,
                None => session.caller(key.as_deref())?,
            };
            let account = session.accounts.deploy(owner, name)?;
            println!("Account deployed: {}", account.address());
        }
        AccountCommands::Rename { account, name, key } => {
            let caller = session.caller(key.as_deref())?;
            let record = lookup(session, &account)?;
            record.change_name(name, &caller)?;
            session.accounts.save(&record)?;
            println!("Account {} renamed to '{}'", account, record.name()?);
        }
        AccountCommands::Transfer { account, new_owner, key } => {
            let caller = session.caller(key.as_deref())?;
            let record = lookup(session, &account)?;
            record.change_owner(new_owner, &caller)?;
            session.accounts.save(&record)?;
            println!("Account {} now owned by {}", account, new_owner);
        }
        AccountCommands::Show { account } => {
            let record = lookup(session, &account)?;
            println!("Account: {}", account);
            println!("Owner:   {}", record.owner()?);
            println!("Name:    {}", record.name()?);
        }
    }
    Ok(())
}

pub(super) fn lookup(session: &Session, account: &AccountAddress) -> Result<AccountRef> {
    session
        .accounts
        .get(account)
        .ok_or(RegistryError::UnknownAccount(*account))
}
