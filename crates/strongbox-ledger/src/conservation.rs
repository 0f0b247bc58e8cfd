//! Supply conservation invariant checker.
//!
//! Invariant that must hold after every committed operation:
//! ```text
//! Σ(balance) == total_deposited == Σ(inflow) - Σ(outflow)  and  total_deposited <= bank_cap
//! ```
//!
//! The lifetime flows wrap modulo 2^128, so their difference is taken with
//! wrapping arithmetic. That is exact because `total_deposited` is itself a
//! `u128` bounded by the cap.
//!
//! The ledger never relies on this check for correctness; it exists so
//! auditors and tests can detect an accounting defect immediately.

use strongbox_types::{AccountEntry, Amount, Result, StrongboxError};

use crate::store::Totals;

/// Verify balances against the aggregates.
///
/// # Errors
/// Returns [`StrongboxError::SupplyInvariantViolation`] describing the first
/// mismatch found.
pub fn verify<'a>(
    entries: impl IntoIterator<Item = &'a AccountEntry>,
    totals: Totals,
    bank_cap: Amount,
) -> Result<()> {
    let actual = entries
        .into_iter()
        .try_fold(0u128, |sum, entry| sum.checked_add(entry.balance))
        .ok_or_else(|| StrongboxError::SupplyInvariantViolation {
            reason: "sum of balances overflows".into(),
        })?;

    if actual != totals.deposited {
        return Err(StrongboxError::SupplyInvariantViolation {
            reason: format!(
                "sum of balances {actual} != total_deposited {}",
                totals.deposited
            ),
        });
    }

    let expected = totals.inflow.wrapping_sub(totals.outflow);
    if expected != totals.deposited {
        return Err(StrongboxError::SupplyInvariantViolation {
            reason: format!(
                "total_deposited {} != inflow {} - outflow {}",
                totals.deposited, totals.inflow, totals.outflow
            ),
        });
    }

    if totals.deposited > bank_cap {
        return Err(StrongboxError::SupplyInvariantViolation {
            reason: format!(
                "total_deposited {} exceeds bank_cap {bank_cap}",
                totals.deposited
            ),
        });
    }

    Ok(())
}
