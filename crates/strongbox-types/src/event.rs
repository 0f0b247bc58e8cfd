//! Notifications emitted by the ledger.
//!
//! Every committed deposit and every withdrawal's bookkeeping produces an
//! [`EventRecord`] for the external observability collaborator. Records
//! belonging to a withdrawal that is later rolled back are discarded
//! before anyone can observe them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, OwnerId};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEvent {
    /// Value was credited to `owner`.
    DepositMade { owner: OwnerId, amount: Amount },
    /// `owner`'s balance was debited ahead of releasing the value.
    WithdrawalMade { owner: OwnerId, amount: Amount },
}

impl LedgerEvent {
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        match self {
            Self::DepositMade { owner, .. } | Self::WithdrawalMade { owner, .. } => *owner,
        }
    }

    #[must_use]
    pub fn amount(&self) -> Amount {
        match self {
            Self::DepositMade { amount, .. } | Self::WithdrawalMade { amount, .. } => *amount,
        }
    }
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepositMade { owner, amount } => write!(f, "DEPOSIT_MADE({owner}, {amount})"),
            Self::WithdrawalMade { owner, amount } => {
                write!(f, "WITHDRAWAL_MADE({owner}, {amount})")
            }
        }
    }
}

/// A notification with its position in the ledger's event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Ledger-wide sequence number, gap-free across committed records.
    pub sequence: u64,
    /// Wall-clock time the record was produced.
    pub emitted_at: DateTime<Utc>,
    pub event: LedgerEvent,
}
