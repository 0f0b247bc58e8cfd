//! The custodial ledger.
//!
//! Owns every balance, counter and aggregate. Deposits are checked and
//! applied in one step. Withdrawals follow checks-effects-interactions:
//!
//! ```text
//! check limit → check balance → check amount > 0
//!   → debit + count + WithdrawalMade          (committed, journaled)
//!   → ValueRelease::release(&mut ledger, ..)  (may re-enter)
//!   → Ok: keep        Err: unwind journal → TransferFailed
//! ```
//!
//! Because the debit is in place before control leaves the ledger, a
//! reentrant call sees the reduced balance and cannot spend it twice.

use chrono::Utc;
use strongbox_types::{
    AccountEntry, Amount, EventRecord, LedgerConfig, LedgerEvent, OwnerId, Result,
    StrongboxError, constants,
};

use crate::conservation;
use crate::release::ValueRelease;
use crate::store::{AccountStore, Totals};

/// State to return to if a withdrawal's release fails.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    journal_mark: usize,
    events_len: usize,
    next_sequence: u64,
}

/// Owner-keyed custodial ledger with an intake ceiling and a
/// per-withdrawal ceiling.
#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    store: AccountStore,
    events: Vec<EventRecord>,
    next_sequence: u64,
    /// Withdrawals currently waiting on their value release.
    depth: u32,
}

impl Ledger {
    /// Create a ledger with the given ceilings.
    ///
    /// # Errors
    /// Returns [`StrongboxError::InvalidConfig`] if either ceiling is zero.
    pub fn new(bank_cap: Amount, max_withdraw_per_operation: Amount) -> Result<Self> {
        Self::with_config(LedgerConfig::new(bank_cap, max_withdraw_per_operation))
    }

    /// Create a ledger from a full config.
    ///
    /// # Errors
    /// Returns [`StrongboxError::InvalidConfig`] if the config is invalid.
    pub fn with_config(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            bank_cap = %config.bank_cap,
            max_withdraw = %config.max_withdraw_per_operation,
            max_depth = config.max_reentrancy_depth,
            "Ledger created"
        );
        Ok(Self {
            config,
            store: AccountStore::new(),
            events: Vec::new(),
            next_sequence: 0,
            depth: 0,
        })
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Credit `amount`, the value attached to the call, to `owner`.
    ///
    /// # Errors
    /// - `AmountZero` if `amount` is zero
    /// - `BankCapExceeded` if total deposits would exceed the bank cap
    pub fn deposit(&mut self, owner: OwnerId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(StrongboxError::AmountZero);
        }
        let total_deposited = self.total_deposited();
        let bank_cap = self.config.bank_cap;
        if total_deposited
            .checked_add(amount)
            .is_none_or(|after| after > bank_cap)
        {
            return Err(StrongboxError::BankCapExceeded {
                requested: amount,
                total_deposited,
                bank_cap,
            });
        }

        self.store.credit(owner, amount);
        self.emit(LedgerEvent::DepositMade { owner, amount });

        tracing::debug!(
            owner = %owner.short(),
            amount = %amount,
            total_deposited = %self.total_deposited(),
            depth = self.depth,
            "Deposit committed"
        );
        Ok(())
    }

    /// Debit `amount` from `owner` and release it through `release`.
    ///
    /// Checks run in a fixed order and the first failure wins: per-operation
    /// limit, then balance, then non-zero amount. The debit, the counter and
    /// the `WithdrawalMade` notification are applied before `release` runs.
    ///
    /// # Errors
    /// - `WithdrawalLimitExceeded` if `amount` exceeds the per-operation limit
    /// - `InsufficientBalance` if `amount` exceeds the owner's balance
    /// - `AmountZero` if `amount` is zero
    /// - `ReentrancyDepthExceeded` if too many withdrawals are already nested
    /// - `TransferFailed` if `release` failed; all effects of this call,
    ///   including those of reentrant calls, are undone
    pub fn withdraw<R>(&mut self, owner: OwnerId, amount: Amount, release: &mut R) -> Result<()>
    where
        R: ValueRelease + ?Sized,
    {
        let limit = self.config.max_withdraw_per_operation;
        if amount > limit {
            return Err(StrongboxError::WithdrawalLimitExceeded {
                requested: amount,
                limit,
            });
        }
        let available = self.balance(owner);
        if amount > available {
            return Err(StrongboxError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if amount == 0 {
            return Err(StrongboxError::AmountZero);
        }
        if self.depth >= self.config.max_reentrancy_depth {
            return Err(StrongboxError::ReentrancyDepthExceeded { depth: self.depth });
        }

        let checkpoint = self.checkpoint();
        self.depth += 1;

        // Effects. Must stay ahead of the release below.
        self.store.debit(owner, amount);
        self.emit(LedgerEvent::WithdrawalMade { owner, amount });

        let outcome = release.release(self, owner, amount);
        self.depth -= 1;

        match outcome {
            Ok(()) => {
                if self.depth == 0 {
                    self.store.end_journal();
                }
                tracing::debug!(
                    owner = %owner.short(),
                    amount = %amount,
                    total_deposited = %self.total_deposited(),
                    depth = self.depth,
                    "Withdrawal committed"
                );
                Ok(())
            }
            Err(err) => {
                self.rollback(checkpoint);
                tracing::warn!(
                    owner = %owner.short(),
                    amount = %amount,
                    reason = %err,
                    depth = self.depth,
                    "Value release failed, withdrawal rolled back"
                );
                Err(StrongboxError::TransferFailed { reason: err.reason })
            }
        }
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Balance held for `owner`. Zero if never seen.
    #[must_use]
    pub fn balance(&self, owner: OwnerId) -> Amount {
        self.store.account(owner).balance
    }

    /// Successful deposits by `owner`.
    #[must_use]
    pub fn deposit_count(&self, owner: OwnerId) -> u64 {
        self.store.account(owner).deposit_count
    }

    /// Successful withdrawals by `owner`.
    #[must_use]
    pub fn withdrawal_count(&self, owner: OwnerId) -> u64 {
        self.store.account(owner).withdrawal_count
    }

    /// Full entry for `owner`.
    #[must_use]
    pub fn account(&self, owner: OwnerId) -> AccountEntry {
        self.store.account(owner)
    }

    #[must_use]
    pub fn bank_cap(&self) -> Amount {
        self.config.bank_cap
    }

    #[must_use]
    pub fn max_withdraw_per_operation(&self) -> Amount {
        self.config.max_withdraw_per_operation
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_deposited(&self) -> Amount {
        self.store.totals().deposited
    }

    /// How much more the ledger will accept before hitting the cap.
    #[must_use]
    pub fn remaining_capacity(&self) -> Amount {
        self.config.bank_cap.saturating_sub(self.total_deposited())
    }

    /// Lifetime value accepted and released.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.store.totals()
    }

    /// Owners that have ever deposited.
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.store.owner_count()
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&OwnerId, &AccountEntry)> {
        self.store.accounts()
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of withdrawals currently awaiting their value release.
    #[must_use]
    pub fn in_flight_depth(&self) -> u32 {
        self.depth
    }

    /// Check that balances and aggregates agree.
    ///
    /// # Errors
    /// Returns [`StrongboxError::SupplyInvariantViolation`] on mismatch.
    pub fn verify_conservation(&self) -> Result<()> {
        conservation::verify(
            self.store.accounts().map(|(_, entry)| entry),
            self.store.totals(),
            self.config.bank_cap,
        )
    }

    // -----------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------

    /// Notifications not yet taken.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Drain notifications for delivery.
    ///
    /// Returns nothing while a withdrawal is in flight: its records may
    /// still be rolled back.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        if self.depth > 0 {
            return Vec::new();
        }
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: LedgerEvent) {
        tracing::trace!(
            sequence = self.next_sequence,
            owner = %event.owner().short(),
            amount = %event.amount(),
            "{event}"
        );
        self.events.push(EventRecord {
            sequence: self.next_sequence,
            emitted_at: Utc::now(),
            event,
        });
        self.next_sequence += 1;
    }

    // -----------------------------------------------------------------
    // Rollback
    // -----------------------------------------------------------------

    fn checkpoint(&mut self) -> Checkpoint {
        if self.depth == 0 {
            self.store.begin_journal();
        }
        Checkpoint {
            journal_mark: self.store.journal_mark(),
            events_len: self.events.len(),
            next_sequence: self.next_sequence,
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.store.rollback_to(checkpoint.journal_mark);
        self.events.truncate(checkpoint.events_len);
        self.next_sequence = checkpoint.next_sequence;
        if self.depth == 0 {
            self.store.end_journal();
        }
    }
}
