//! Errors that stop the dapp.
//!
//! Request-level failures (bad payloads, rejected bids) never show up
//! here; they become a `reject` status. Only the coordinator boundary
//! can end the polling loop.

use thiserror::Error;

use crate::coordinator::TransportError;

#[derive(Debug, Error)]
pub enum DappError {
    #[error("coordinator error: {0}")]
    Coordinator(#[from] TransportError),

    #[error("giving up after {attempts} consecutive transient failures: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: TransportError,
    },
}
