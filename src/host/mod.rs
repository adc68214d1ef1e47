//! Host registry
//!
//! Tracks which account owners are active or banned and resolves names,
//! without ever holding authority over the accounts themselves.

pub mod events;
pub mod registry;
pub mod snapshot;

pub use events::HostEvent;
pub use registry::{Host, RegistryStatus};
pub use snapshot::HostSnapshot;
