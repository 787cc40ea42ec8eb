//! auction-core
//!
//! Pure auction state machine logic:
//! - commands (typed advance / inspect requests and their status)
//! - accounts and escrowed bids
//! - settlement with threshold redraws
//! - serializable state snapshots

pub mod account;
pub mod command;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod threshold;

pub use account::{Account, Amount};

pub use command::{
    AdvanceCommand,
    CreateAccount,
    InspectQuery,
    SendBid,
    Status,
};

pub use engine::{AuctionConfig, AuctionEngine, Outcome, Refund};
pub use error::AuctionError;
pub use snapshot::AuctionSnapshot;
pub use threshold::{FixedThreshold, InvalidThresholdRange, SeededThreshold, ThresholdSource};
