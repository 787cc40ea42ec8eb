//! Validation errors for the auction engine.
//!
//! Every variant describes a well-formed request that violates a
//! domain rule. The engine guarantees no state was mutated when one
//! of these is returned, and the driver reports it as `reject`.

use thiserror::Error;

use crate::account::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("account `{0}` already exists")]
    DuplicateAccount(String),

    #[error("account `{0}` does not exist")]
    UnknownAccount(String),

    #[error("bid of {value} does not exceed the minimum bid of {threshold}")]
    BidBelowThreshold { value: Amount, threshold: Amount },

    #[error("bid of {value} does not exceed the current highest bid of {current}")]
    BidNotAboveCurrent { value: Amount, current: Amount },

    #[error("account `{name}` has balance {balance}, cannot bid {value}")]
    InsufficientBalance {
        name: String,
        balance: Amount,
        value: Amount,
    },

    #[error("no bid has been placed since the last settlement")]
    NoBidToSettle,

    #[error("crediting account `{0}` would overflow its balance")]
    BalanceOverflow(String),
}
