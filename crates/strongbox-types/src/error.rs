//! Error types for the Strongbox ledger.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Configuration errors
//! - 2xx: Deposit errors
//! - 3xx: Withdrawal errors
//! - 8xx: Invariant errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::Amount;

/// Central error enum for all Strongbox operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrongboxError {
    // =================================================================
    // Configuration Errors (1xx)
    // =================================================================
    /// A ceiling was zero, or the config could not be accepted.
    #[error("SB_ERR_100: Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // =================================================================
    // Deposit Errors (2xx)
    // =================================================================
    /// The attached or requested amount is not strictly positive.
    #[error("SB_ERR_200: Amount must be greater than zero")]
    AmountZero,

    /// The deposit would push total deposits above the bank cap.
    #[error(
        "SB_ERR_201: Bank cap exceeded: depositing {requested} onto {total_deposited} exceeds cap {bank_cap}"
    )]
    BankCapExceeded {
        requested: Amount,
        total_deposited: Amount,
        bank_cap: Amount,
    },

    // =================================================================
    // Withdrawal Errors (3xx)
    // =================================================================
    /// The withdrawal exceeds the per-operation ceiling.
    #[error("SB_ERR_300: Withdrawal limit exceeded: requested {requested}, limit {limit}")]
    WithdrawalLimitExceeded { requested: Amount, limit: Amount },

    /// The withdrawal exceeds the caller's own balance.
    #[error("SB_ERR_301: Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    /// The value release reported failure; the withdrawal was rolled back.
    #[error("SB_ERR_302: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// Too many withdrawals nested inside value-release callbacks.
    #[error("SB_ERR_303: Reentrancy depth {depth} exceeded")]
    ReentrancyDepthExceeded { depth: u32 },

    // =================================================================
    // Invariant Errors (8xx)
    // =================================================================
    /// Sum of balances no longer matches the aggregate. Critical.
    #[error("SB_ERR_800: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (config file).
    #[error("SB_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, StrongboxError>;

impl From<std::io::Error> for StrongboxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StrongboxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Failure reported by a value-release handoff.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct ReleaseError {
    pub reason: String,
}

impl ReleaseError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// Lets a release callback propagate a failed nested ledger call with `?`.
impl From<StrongboxError> for ReleaseError {
    fn from(err: StrongboxError) -> Self {
        Self::new(err.to_string())
    }
}
