//! Read-only view of the auction state, as reported to inspect requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::account::{Account, Amount};

/// Full state snapshot.
///
/// Serialized as camelCase JSON:
///
/// ```text
/// {
///   "beneficiary": "0x...",
///   "minimumBid": 100,
///   "highestBid": 150,
///   "highestBidder": "alice",      // null when no bid stands
///   "auctionDuration": 3600,
///   "accounts": { "alice": { "balance": 50 }, ... }
/// }
/// ```
///
/// Accounts are ordered by name so every node emits byte-identical reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSnapshot {
    pub beneficiary: String,
    pub minimum_bid: Amount,
    pub highest_bid: Amount,
    pub highest_bidder: Option<String>,
    pub auction_duration: u64,
    pub accounts: BTreeMap<String, Account>,
}

impl AuctionSnapshot {
    /// Balance of `name`, if the account exists.
    pub fn balance_of(&self, name: &str) -> Option<Amount> {
        self.accounts.get(name).map(|a| a.balance)
    }
}
