//! Ledger configuration.
//!
//! All ceilings are fixed once the ledger is constructed. There is no
//! operation that adjusts them afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Amount, Result, StrongboxError, constants};

/// Construction-time configuration for a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Maximum permissible value of total deposits.
    pub bank_cap: Amount,
    /// Ceiling on a single withdrawal's amount.
    pub max_withdraw_per_operation: Amount,
    /// How many withdrawals may be nested inside value-release callbacks.
    #[serde(default = "default_max_reentrancy_depth")]
    pub max_reentrancy_depth: u32,
}

fn default_max_reentrancy_depth() -> u32 {
    constants::DEFAULT_MAX_REENTRANCY_DEPTH
}

impl LedgerConfig {
    /// Config with the given ceilings and the default reentrancy depth.
    #[must_use]
    pub fn new(bank_cap: Amount, max_withdraw_per_operation: Amount) -> Self {
        Self {
            bank_cap,
            max_withdraw_per_operation,
            max_reentrancy_depth: constants::DEFAULT_MAX_REENTRANCY_DEPTH,
        }
    }

    /// Override the reentrancy depth.
    #[must_use]
    pub fn with_max_reentrancy_depth(mut self, depth: u32) -> Self {
        self.max_reentrancy_depth = depth;
        self
    }

    /// Reject zero ceilings.
    ///
    /// # Errors
    /// Returns [`StrongboxError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.bank_cap == 0 {
            return Err(StrongboxError::InvalidConfig {
                reason: "bank_cap must be greater than zero".into(),
            });
        }
        if self.max_withdraw_per_operation == 0 {
            return Err(StrongboxError::InvalidConfig {
                reason: "max_withdraw_per_operation must be greater than zero".into(),
            });
        }
        if self.max_reentrancy_depth == 0 {
            return Err(StrongboxError::InvalidConfig {
                reason: "max_reentrancy_depth must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
