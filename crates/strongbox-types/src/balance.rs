//! Per-owner account state.
//!
//! Every owner has a balance plus two audit counters. An owner the
//! ledger has never seen is indistinguishable from one whose entry is
//! all zeros.

use serde::{Deserialize, Serialize};

/// Value in the smallest unit. No fractional component.
pub type Amount = u128;

/// A single account entry for one owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AccountEntry {
    /// Value held on the owner's behalf.
    pub balance: Amount,
    /// Number of successful deposits.
    pub deposit_count: u64,
    /// Number of successful withdrawals.
    pub withdrawal_count: u64,
}

impl AccountEntry {
    /// Create a zero entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balance: 0,
            deposit_count: 0,
            withdrawal_count: 0,
        }
    }

    /// Whether this entry carries no balance and no history.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_entry_default_is_zero() {
        let entry = AccountEntry::default();
        assert_eq!(entry.balance, 0);
        assert_eq!(entry.deposit_count, 0);
        assert_eq!(entry.withdrawal_count, 0);
        assert!(entry.is_zero());
    }

    #[test]
    fn zero_balance_with_history_is_not_zero_entry() {
        let entry = AccountEntry {
            balance: 0,
            deposit_count: 1,
            withdrawal_count: 1,
        };
        assert!(!entry.is_zero());
    }

    #[test]
    fn account_entry_serde_roundtrip() {
        let entry = AccountEntry {
            balance: 12_345,
            deposit_count: 3,
            withdrawal_count: 1,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: AccountEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
