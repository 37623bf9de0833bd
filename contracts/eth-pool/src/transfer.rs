//! Funds Transfer seam
//!
//! The ledger never moves funds itself. Withdrawals commit their state change
//! first and then hand the payout to a `FundsTransfer`.

use ethpool_common::{Address, Amount, PoolResult};

/// Moves funds out of the pool to an account
pub trait FundsTransfer {
    /// Pay `amount` to `to`
    ///
    /// Return `PoolError::TransferFailed` if the funds could not be delivered;
    /// the withdrawal is then rolled back.
    fn transfer(&mut self, to: Address, amount: Amount) -> PoolResult<()>;
}

impl<F> FundsTransfer for F
where
    F: FnMut(Address, Amount) -> PoolResult<()>,
{
    fn transfer(&mut self, to: Address, amount: Amount) -> PoolResult<()> {
        self(to, amount)
    }
}

/// Transfer that records every payout in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoutRecorder {
    payouts: Vec<(Address, Amount)>,
}

impl PayoutRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payouts delivered so far
    pub fn payouts(&self) -> &[(Address, Amount)] {
        &self.payouts
    }

    /// Sum delivered to `account`
    pub fn total_paid_to(&self, account: &Address) -> Amount {
        self.payouts
            .iter()
            .filter(|(to, _)| to == account)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

impl FundsTransfer for PayoutRecorder {
    fn transfer(&mut self, to: Address, amount: Amount) -> PoolResult<()> {
        self.payouts.push((to, amount));
        Ok(())
    }
}
