//! Owner-keyed account store.
//!
//! The store is a total function `OwnerId -> AccountEntry` defaulting to
//! zero, plus the global aggregates. It performs no limit checks; the
//! [`Ledger`](crate::Ledger) validates before calling in. Every mutation
//! is journaled while a withdrawal is in flight.

use std::collections::HashMap;

use strongbox_types::{AccountEntry, Amount, OwnerId};

use crate::journal::{Journal, Undo};

/// Global aggregates, mutated alongside every balance change.
///
/// `inflow` and `outflow` are lifetime counters that wrap modulo 2^128.
/// Their difference is still exact, since `deposited` never exceeds the cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Current sum of all balances.
    pub deposited: Amount,
    /// Lifetime value accepted through deposits.
    pub inflow: Amount,
    /// Lifetime value released through withdrawals.
    pub outflow: Amount,
}

/// Balances, audit counters and aggregates for every owner.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<OwnerId, AccountEntry>,
    totals: Totals,
    journal: Journal,
}

impl AccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The owner's entry, zero if never seen.
    #[must_use]
    pub fn account(&self, owner: OwnerId) -> AccountEntry {
        self.accounts.get(&owner).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Number of owners that have ever held an entry.
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&OwnerId, &AccountEntry)> {
        self.accounts.iter()
    }

    /// Add `amount` to the owner's balance and count one deposit.
    ///
    /// The caller has checked the sum against the bank cap.
    pub(crate) fn credit(&mut self, owner: OwnerId, amount: Amount) {
        self.save_account(owner);
        self.save_totals();

        let entry = self.accounts.entry(owner).or_default();
        entry.balance += amount;
        entry.deposit_count += 1;

        self.totals.deposited += amount;
        self.totals.inflow = self.totals.inflow.wrapping_add(amount);
    }

    /// Take `amount` from the owner's balance and count one withdrawal.
    ///
    /// The caller has checked `amount <= balance`.
    pub(crate) fn debit(&mut self, owner: OwnerId, amount: Amount) {
        self.save_account(owner);
        self.save_totals();

        let entry = self.accounts.entry(owner).or_default();
        entry.balance -= amount;
        entry.withdrawal_count += 1;

        self.totals.deposited -= amount;
        self.totals.outflow = self.totals.outflow.wrapping_add(amount);
    }

    pub(crate) fn begin_journal(&mut self) {
        self.journal.begin();
    }

    pub(crate) fn journal_mark(&self) -> usize {
        self.journal.mark()
    }

    /// Restore every entry and aggregate to what it was at `mark`.
    pub(crate) fn rollback_to(&mut self, mark: usize) {
        for undo in self.journal.unwind(mark) {
            match undo {
                Undo::Account { owner, prior: None } => {
                    self.accounts.remove(&owner);
                }
                Undo::Account {
                    owner,
                    prior: Some(entry),
                } => {
                    self.accounts.insert(owner, entry);
                }
                Undo::Totals(totals) => self.totals = totals,
            }
        }
    }

    /// Keep everything recorded so far and stop journaling.
    pub(crate) fn end_journal(&mut self) {
        self.journal.end();
    }

    fn save_account(&mut self, owner: OwnerId) {
        if self.journal.is_active() {
            let prior = self.accounts.get(&owner).copied();
            self.journal.record(Undo::Account { owner, prior });
        }
    }

    fn save_totals(&mut self) {
        self.journal.record(Undo::Totals(self.totals));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(b: u8) -> OwnerId {
        OwnerId::from_bytes([b; 32])
    }

    #[test]
    fn unknown_owner_is_zero() {
        let store = AccountStore::new();
        assert!(store.account(owner(1)).is_zero());
        assert_eq!(store.owner_count(), 0);
    }

    #[test]
    fn credit_and_debit_move_totals() {
        let mut store = AccountStore::new();
        store.credit(owner(1), 30);
        store.debit(owner(1), 5);

        let entry = store.account(owner(1));
        assert_eq!(entry.balance, 25);
        assert_eq!(entry.deposit_count, 1);
        assert_eq!(entry.withdrawal_count, 1);
        assert_eq!(
            store.totals(),
            Totals {
                deposited: 25,
                inflow: 30,
                outflow: 5,
            }
        );
    }

    #[test]
    fn mutations_outside_journal_are_not_recorded() {
        let mut store = AccountStore::new();
        store.credit(owner(1), 10);
        assert_eq!(store.journal_mark(), 0);
    }

    #[test]
    fn rollback_restores_entries_and_totals() {
        let mut store = AccountStore::new();
        store.credit(owner(1), 30);
        let before = store.totals();

        store.begin_journal();
        let mark = store.journal_mark();
        store.debit(owner(1), 10);
        store.credit(owner(2), 7);
        store.rollback_to(mark);
        store.end_journal();

        assert_eq!(store.account(owner(1)).balance, 30);
        assert_eq!(store.account(owner(1)).withdrawal_count, 0);
        assert_eq!(store.totals(), before);
        // Owner 2 did not exist at the mark, so its entry is gone again.
        assert_eq!(store.owner_count(), 1);
    }

    #[test]
    fn lifetime_flows_wrap_without_losing_the_difference() {
        let mut store = AccountStore::new();
        store.credit(owner(1), u128::MAX);
        store.debit(owner(1), u128::MAX);
        store.credit(owner(1), 3);

        let totals = store.totals();
        assert_eq!(totals.deposited, 3);
        assert_eq!(totals.inflow, 2);
        assert_eq!(totals.outflow, u128::MAX);
        assert_eq!(totals.inflow.wrapping_sub(totals.outflow), 3);
        assert_eq!(store.account(owner(1)).balance, 3);
    }

    #[test]
    fn partial_rollback_keeps_earlier_entries() {
        let mut store = AccountStore::new();
        store.credit(owner(1), 30);

        store.begin_journal();
        store.debit(owner(1), 10);
        let inner = store.journal_mark();
        store.debit(owner(1), 5);
        store.rollback_to(inner);
        store.end_journal();

        assert_eq!(store.account(owner(1)).balance, 20);
        assert_eq!(store.account(owner(1)).withdrawal_count, 1);
        assert_eq!(store.totals().deposited, 20);
    }
}
