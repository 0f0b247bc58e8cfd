//! System-wide constants for the Strongbox ledger.

/// Default ceiling on nested withdrawals issued from value-release callbacks.
pub const DEFAULT_MAX_REENTRANCY_DEPTH: u32 = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Strongbox";
