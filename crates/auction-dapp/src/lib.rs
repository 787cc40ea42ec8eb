//! auction-dapp
//!
//! Rollup driver for the auction state machine: polls the coordinator
//! for requests, routes them through the payload codec into the
//! engine, and reports statuses and snapshots back.

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod runner;

pub use config::Config;
pub use coordinator::{Coordinator, FinishResponse, TransportError};
pub use dispatch::Dispatcher;
pub use error::DappError;
pub use http::HttpCoordinator;
pub use runner::{RetryPolicy, RunStats, Runner};
