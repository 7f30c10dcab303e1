//! The backup store, and whatever else is required by more than one of the tools in this
//! workspace.
//!
pub mod backup_store;
pub mod constants;
pub mod display;
pub mod error;
pub mod filesystem;
pub mod layout;
pub mod macros;
pub mod naming;
pub mod selector;
pub mod shell;
pub mod types;
pub mod user_interaction;

#[cfg(test)]
pub mod test_helper;

pub use backup_store::{BackupStore, DeletePlan, DeleteReport};
pub use error::{StoreError, StoreResult};
pub use layout::{Layout, LayoutArgs};
pub use selector::Selector;
pub use shell::Shell;
pub use types::{BackupEntry, BackupList, Opts};
