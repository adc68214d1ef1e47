//! Account records
//!
//! An account is an owner address plus a display name. Only the current owner
//! may rename it or hand it to someone else, and it never reports those
//! changes to anyone tracking it.

pub mod auth;
pub mod handle;
pub mod store;
pub mod types;

pub use handle::AccountRef;
pub use store::AccountStore;
pub use types::{Account, AccountAddress};
