//! Single-round auction engine.
//!
//! - Owns every account and the standing bid.
//! - Routes advance commands to the account / bid / settlement handlers.
//! - Produces snapshots for inspect requests.
//!
//! Funds debited from the highest bidder are held by the engine itself
//! (not by any account) until the bid is outbid, which refunds it, or
//! settled, which pays it to the beneficiary. Every handler validates
//! fully before touching state, so a rejected command never leaves a
//! partial refund or debit behind.

use std::collections::BTreeMap;
use std::fmt;

use crate::account::{Account, Amount};
use crate::command::{AdvanceCommand, CreateAccount, SendBid};
use crate::error::AuctionError;
use crate::snapshot::AuctionSnapshot;
use crate::threshold::ThresholdSource;

/// Construction-time parameters of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionConfig {
    /// Account credited with the winning bid on settlement.
    pub beneficiary: String,

    /// Threshold in force until the first settlement.
    pub initial_threshold: Amount,

    /// Informational round length, reported in snapshots.
    pub auction_duration_secs: u64,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        AuctionConfig {
            beneficiary: "0x0000000000000000000000000000000000000000".to_string(),
            initial_threshold: 100,
            auction_duration_secs: 3600,
        }
    }
}

/// What an accepted command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AccountCreated {
        name: String,
        balance: Amount,
    },

    BidPlaced {
        bidder: String,
        value: Amount,
        /// Escrow returned to the previous highest bidder, if any.
        refunded: Option<Refund>,
    },

    AuctionSettled {
        winner: String,
        amount: Amount,
        beneficiary: String,
        next_threshold: Amount,
    },
}

/// Escrow returned to an outbid bidder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    pub bidder: String,
    pub amount: Amount,
}

/// The standing bid. Its absence encodes "highest bid is 0, no bidder".
#[derive(Debug, Clone, PartialEq, Eq)]
struct HighestBid {
    bidder: String,
    value: Amount,
}

/// The auction state machine.
pub struct AuctionEngine {
    beneficiary: String,
    minimum_bid: Amount,
    highest: Option<HighestBid>,
    accounts: BTreeMap<String, Account>,
    auction_duration_secs: u64,
    thresholds: Box<dyn ThresholdSource>,
}

impl fmt::Debug for AuctionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuctionEngine")
            .field("beneficiary", &self.beneficiary)
            .field("minimum_bid", &self.minimum_bid)
            .field("highest", &self.highest)
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}

impl AuctionEngine {
    /// Create an engine whose only account is the beneficiary, at balance 0.
    pub fn new(config: AuctionConfig, thresholds: impl ThresholdSource + 'static) -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert(config.beneficiary.clone(), Account::default());

        AuctionEngine {
            beneficiary: config.beneficiary,
            minimum_bid: config.initial_threshold,
            highest: None,
            accounts,
            auction_duration_secs: config.auction_duration_secs,
            thresholds: Box::new(thresholds),
        }
    }

    /// Apply a single advance command.
    ///
    /// On `Err` the engine is exactly as it was before the call.
    pub fn process(&mut self, command: AdvanceCommand) -> Result<Outcome, AuctionError> {
        match command {
            AdvanceCommand::CreateAccount(CreateAccount { name, balance }) => {
                self.create_account(name, balance)
            }
            AdvanceCommand::SendBid(SendBid { name, value }) => self.place_bid(&name, value),
            AdvanceCommand::EndAuction => self.settle_auction(),
        }
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    /// Open a new account. Names are unique for the life of the process.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        balance: Amount,
    ) -> Result<Outcome, AuctionError> {
        let name = name.into();
        if self.accounts.contains_key(&name) {
            return Err(AuctionError::DuplicateAccount(name));
        }

        self.accounts.insert(name.clone(), Account::new(balance));
        Ok(Outcome::AccountCreated { name, balance })
    }

    /// Place a bid of `value` on behalf of `name`.
    ///
    /// The bid must strictly exceed both the threshold and the standing
    /// bid. A bidder raising their own standing bid may count that bid's
    /// escrow toward the new one, so only the difference is debited.
    pub fn place_bid(&mut self, name: &str, value: Amount) -> Result<Outcome, AuctionError> {
        let bidder = self
            .accounts
            .get(name)
            .copied()
            .ok_or_else(|| AuctionError::UnknownAccount(name.to_string()))?;

        if value <= self.minimum_bid {
            return Err(AuctionError::BidBelowThreshold {
                value,
                threshold: self.minimum_bid,
            });
        }

        let current = self.highest_bid();
        if value <= current {
            return Err(AuctionError::BidNotAboveCurrent { value, current });
        }

        // Work out every new balance before writing any of them.
        let self_raise = self.highest_bidder() == Some(name);
        let funds = if self_raise {
            bidder
                .credited(current)
                .map(Account::new)
                .ok_or_else(|| AuctionError::BalanceOverflow(name.to_string()))?
        } else {
            bidder
        };

        let bidder_balance = funds
            .debited(value)
            .ok_or_else(|| AuctionError::InsufficientBalance {
                name: name.to_string(),
                balance: funds.balance,
                value,
            })?;

        let refund = match &self.highest {
            Some(prev) if !self_raise => {
                // Accounts are never removed, so the standing bidder still has one.
                let prev_account = self.account(&prev.bidder).copied();
                debug_assert!(prev_account.is_some(), "standing bidder `{}` has no account", prev.bidder);
                let prev_balance = prev_account
                    .unwrap_or_default()
                    .credited(prev.value)
                    .ok_or_else(|| AuctionError::BalanceOverflow(prev.bidder.clone()))?;
                Some((
                    Refund {
                        bidder: prev.bidder.clone(),
                        amount: prev.value,
                    },
                    prev_balance,
                ))
            }
            _ => None,
        };

        // Commit.
        let refunded = refund.map(|(refund, prev_balance)| {
            self.accounts
                .entry(refund.bidder.clone())
                .or_default()
                .balance = prev_balance;
            refund
        });

        self.accounts.entry(name.to_string()).or_default().balance = bidder_balance;
        self.highest = Some(HighestBid {
            bidder: name.to_string(),
            value,
        });

        Ok(Outcome::BidPlaced {
            bidder: name.to_string(),
            value,
            refunded,
        })
    }

    /// Close the round: pay the beneficiary, clear the bid, redraw the threshold.
    pub fn settle_auction(&mut self) -> Result<Outcome, AuctionError> {
        let Some(HighestBid {
            bidder: winner,
            value: amount,
        }) = self.highest.clone()
        else {
            return Err(AuctionError::NoBidToSettle);
        };

        // The beneficiary account is created with the engine.
        let beneficiary = self.account(&self.beneficiary).copied();
        debug_assert!(beneficiary.is_some(), "beneficiary has no account");
        let beneficiary_balance = beneficiary
            .unwrap_or_default()
            .credited(amount)
            .ok_or_else(|| AuctionError::BalanceOverflow(self.beneficiary.clone()))?;

        // Validation is complete; only now is the threshold source consulted.
        let next_threshold = self.thresholds.draw();

        self.highest = None;
        self.accounts
            .entry(self.beneficiary.clone())
            .or_default()
            .balance = beneficiary_balance;
        self.minimum_bid = next_threshold;

        Ok(Outcome::AuctionSettled {
            winner,
            amount,
            beneficiary: self.beneficiary.clone(),
            next_threshold,
        })
    }

    /// Produce a serializable copy of the current state.
    pub fn snapshot(&self) -> AuctionSnapshot {
        AuctionSnapshot {
            beneficiary: self.beneficiary.clone(),
            minimum_bid: self.minimum_bid,
            highest_bid: self.highest_bid(),
            highest_bidder: self.highest_bidder().map(str::to_string),
            auction_duration: self.auction_duration_secs,
            accounts: self.accounts.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn beneficiary(&self) -> &str {
        &self.beneficiary
    }

    /// A bid must strictly exceed this value.
    pub fn minimum_bid(&self) -> Amount {
        self.minimum_bid
    }

    /// Standing bid, `0` when nobody has bid this round.
    pub fn highest_bid(&self) -> Amount {
        self.highest.as_ref().map_or(0, |h| h.value)
    }

    pub fn highest_bidder(&self) -> Option<&str> {
        self.highest.as_ref().map(|h| h.bidder.as_str())
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn num_accounts(&self) -> usize {
        self.accounts.len()
    }

    /// Sum of all balances plus the escrowed standing bid.
    ///
    /// Bids, refunds and settlements never change this value; only
    /// account creation adds to it.
    pub fn total_funds(&self) -> u128 {
        let balances: u128 = self.accounts.values().map(|a| u128::from(a.balance)).sum();
        balances + u128::from(self.highest_bid())
    }
}
