//! # strongbox-ledger
//!
//! **Ledger core**: per-owner balances, the bank cap, the per-withdrawal
//! limit, and the checks-effects-interactions discipline that keeps a
//! value-release callback from double-spending.
//!
//! ## Architecture
//!
//! 1. **Ledger**: validates every deposit and withdrawal, mutates state,
//!    then hands withdrawn value to a [`ValueRelease`]
//! 2. **Account store**: owner-keyed entries plus global aggregates
//! 3. **Journal**: undo log that lets a failed release roll back the
//!    withdrawal and everything reentrant calls did inside it
//! 4. **Conservation**: audit check that balances and aggregates agree
//!
//! ## Withdrawal Flow
//!
//! ```text
//! withdraw() → checks → debit + WithdrawalMade → ValueRelease.release()
//!     → Ok: commit    Err: rollback → TransferFailed
//! ```

pub mod conservation;
mod journal;
pub mod ledger;
pub mod release;
mod store;

pub use ledger::Ledger;
pub use release::{FnRelease, PayoutLog, ValueRelease, from_fn};
pub use store::Totals;
