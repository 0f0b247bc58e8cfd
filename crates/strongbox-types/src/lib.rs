//! # strongbox-types
//!
//! Shared types, errors, and configuration for the **Strongbox** custodial
//! ledger.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`OwnerId`]
//! - **Account model**: [`AccountEntry`], [`Amount`]
//! - **Notifications**: [`LedgerEvent`], [`EventRecord`]
//! - **Configuration**: [`LedgerConfig`]
//! - **Errors**: [`StrongboxError`] with `SB_ERR_` prefix codes, [`ReleaseError`]
//! - **Constants**: system-wide defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use strongbox_types::{OwnerId, Amount, LedgerConfig, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;

// Constants are accessed via `strongbox_types::constants::FOO`
// (not re-exported to avoid name collisions).
