//! Command types consumed by the auction engine.
//!
//! These are **transport-agnostic** logical commands:
//! - [`AdvanceCommand`]: state-mutating requests.
//! - [`InspectQuery`]: read-only requests.
//! - [`Status`]: the terminal outcome reported for every request.
//!
//! Note: the hex / JSON wire encoding lives in the `auction-protocol`
//! crate; this module is purely logical.

use serde::{Deserialize, Serialize};

use crate::account::Amount;

/// A state-mutating request into the auction engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceCommand {
    /// Open a new account with an initial balance.
    CreateAccount(CreateAccount),

    /// Place a bid, escrowing `value` from the bidder's balance.
    SendBid(SendBid),

    /// Settle the current round and pay the beneficiary.
    EndAuction,
}

/// Account creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccount {
    pub name: String,
    pub balance: Amount,
}

/// Bid parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendBid {
    pub name: String,
    pub value: Amount,
}

/// A read-only request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectQuery {
    /// Report a full snapshot of the auction state.
    CheckState,
}

/// Final status reported to the coordinator for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Accept,
    Reject,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Accept => "accept",
            Status::Reject => "reject",
        }
    }
}
