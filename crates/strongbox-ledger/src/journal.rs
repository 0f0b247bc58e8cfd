//! Undo journal for withdrawals in flight.
//!
//! While a withdrawal is handing value to the owner, every mutation of the
//! account store records the value it overwrote. If the handoff fails the
//! store unwinds the journal back to the withdrawal's mark, which also
//! reverts anything reentrant calls did in the meantime.

use strongbox_types::{AccountEntry, OwnerId};

use crate::store::Totals;

/// Prior state overwritten by one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Undo {
    /// `prior` is `None` when the owner had no entry yet.
    Account {
        owner: OwnerId,
        prior: Option<AccountEntry>,
    },
    Totals(Totals),
}

/// Append-only log of [`Undo`] entries, recording only while active.
#[derive(Debug, Default)]
pub(crate) struct Journal {
    entries: Vec<Undo>,
    active: bool,
}

impl Journal {
    /// Start recording. Idempotent.
    pub(crate) fn begin(&mut self) {
        self.active = true;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn record(&mut self, undo: Undo) {
        if self.active {
            self.entries.push(undo);
        }
    }

    /// Position to unwind back to.
    pub(crate) fn mark(&self) -> usize {
        self.entries.len()
    }

    /// Remove everything recorded after `mark`, newest first.
    pub(crate) fn unwind(&mut self, mark: usize) -> impl Iterator<Item = Undo> + '_ {
        let mark = mark.min(self.entries.len());
        self.entries.drain(mark..).rev()
    }

    /// Forget all entries and stop recording.
    pub(crate) fn end(&mut self) {
        self.entries.clear();
        self.active = false;
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(b: u8) -> OwnerId {
        OwnerId::from_bytes([b; 32])
    }

    #[test]
    fn inactive_journal_records_nothing() {
        let mut journal = Journal::default();
        journal.record(Undo::Totals(Totals::default()));
        assert_eq!(journal.len(), 0);
        assert!(!journal.is_active());
    }

    #[test]
    fn unwind_returns_newest_first() {
        let mut journal = Journal::default();
        journal.begin();
        journal.record(Undo::Account {
            owner: owner(1),
            prior: None,
        });
        let mark = journal.mark();
        journal.record(Undo::Account {
            owner: owner(2),
            prior: None,
        });
        journal.record(Undo::Account {
            owner: owner(3),
            prior: None,
        });

        let undone: Vec<_> = journal.unwind(mark).collect();
        assert_eq!(
            undone,
            vec![
                Undo::Account {
                    owner: owner(3),
                    prior: None
                },
                Undo::Account {
                    owner: owner(2),
                    prior: None
                },
            ]
        );
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn end_clears_and_deactivates() {
        let mut journal = Journal::default();
        journal.begin();
        journal.record(Undo::Totals(Totals::default()));
        journal.end();
        assert_eq!(journal.len(), 0);
        assert!(!journal.is_active());
    }
}
