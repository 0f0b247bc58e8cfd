//! Value-release handoff.
//!
//! The last step of a withdrawal hands the value to the owner's external
//! endpoint. The handoff is synchronous and all-or-nothing: it either
//! returns `Ok(())` having paid out, or returns a [`ReleaseError`] having
//! paid nothing. It receives the ledger itself, so external code may call
//! back into [`Ledger::deposit`] or [`Ledger::withdraw`] before returning.
//! By then the withdrawal's own bookkeeping is already committed.

use strongbox_types::{Amount, OwnerId, ReleaseError};

use crate::Ledger;

/// Hands withdrawn value to its owner.
pub trait ValueRelease {
    /// Pay `amount` to `to`.
    ///
    /// # Errors
    /// Any error aborts the enclosing withdrawal, which is then rolled
    /// back together with every reentrant call made from here.
    fn release(
        &mut self,
        ledger: &mut Ledger,
        to: OwnerId,
        amount: Amount,
    ) -> Result<(), ReleaseError>;
}

/// Adapter returned by [`from_fn`].
#[derive(Debug, Clone)]
pub struct FnRelease<F>(F);

/// Build a [`ValueRelease`] from a closure.
pub fn from_fn<F>(f: F) -> FnRelease<F>
where
    F: FnMut(&mut Ledger, OwnerId, Amount) -> Result<(), ReleaseError>,
{
    FnRelease(f)
}

impl<F> ValueRelease for FnRelease<F>
where
    F: FnMut(&mut Ledger, OwnerId, Amount) -> Result<(), ReleaseError>,
{
    fn release(
        &mut self,
        ledger: &mut Ledger,
        to: OwnerId,
        amount: Amount,
    ) -> Result<(), ReleaseError> {
        (self.0)(ledger, to, amount)
    }
}

/// Records every payout and always succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoutLog {
    payouts: Vec<(OwnerId, Amount)>,
}

impl PayoutLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payouts in the order they were released.
    #[must_use]
    pub fn payouts(&self) -> &[(OwnerId, Amount)] {
        &self.payouts
    }

    /// Total value paid to `owner`.
    #[must_use]
    pub fn paid_to(&self, owner: OwnerId) -> Amount {
        self.payouts
            .iter()
            .filter(|(to, _)| *to == owner)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl ValueRelease for PayoutLog {
    fn release(
        &mut self,
        _ledger: &mut Ledger,
        to: OwnerId,
        amount: Amount,
    ) -> Result<(), ReleaseError> {
        self.payouts.push((to, amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(b: u8) -> OwnerId {
        OwnerId::from_bytes([b; 32])
    }

    #[test]
    fn payout_log_records_and_sums() {
        let mut ledger = Ledger::new(100, 10).unwrap();
        let mut log = PayoutLog::new();
        log.release(&mut ledger, owner(1), 3).unwrap();
        log.release(&mut ledger, owner(2), 4).unwrap();
        log.release(&mut ledger, owner(1), 5).unwrap();

        assert_eq!(log.payouts().len(), 3);
        assert_eq!(log.paid_to(owner(1)), 8);
        assert_eq!(log.paid_to(owner(2)), 4);
        assert_eq!(log.paid_to(owner(3)), 0);
    }

    #[test]
    fn from_fn_forwards_arguments() {
        let mut ledger = Ledger::new(100, 10).unwrap();
        let mut seen = Vec::new();
        let mut release = from_fn(|_, to, amount| {
            seen.push((to, amount));
            Ok(())
        });
        release.release(&mut ledger, owner(7), 9).unwrap();
        drop(release);
        assert_eq!(seen, vec![(owner(7), 9)]);
    }

    #[test]
    fn from_fn_propagates_failure() {
        let mut ledger = Ledger::new(100, 10).unwrap();
        let mut release = from_fn(|_, _, _| Err(ReleaseError::new("endpoint unreachable")));
        let err = release.release(&mut ledger, owner(1), 1).unwrap_err();
        assert_eq!(err.reason, "endpoint unreachable");
    }
}
