//! Account representation.

use serde::{Deserialize, Serialize};

/// Monetary amount in the smallest currency unit.
///
/// Balances, bids and thresholds all use this type; negative
/// values cannot be represented.
pub type Amount = u64;

/// A bidder's account.
///
/// Accounts are created once and never removed. The balance only
/// moves through bid escrow (debit), refunds and settlement (credit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Account {
    pub balance: Amount,
}

impl Account {
    pub fn new(balance: Amount) -> Self {
        Account { balance }
    }

    /// Balance after crediting `amount`, or `None` on overflow.
    pub fn credited(&self, amount: Amount) -> Option<Amount> {
        self.balance.checked_add(amount)
    }

    /// Balance after debiting `amount`, or `None` if it cannot be covered.
    pub fn debited(&self, amount: Amount) -> Option<Amount> {
        self.balance.checked_sub(amount)
    }
}
