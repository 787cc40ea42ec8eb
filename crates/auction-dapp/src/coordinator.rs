//! Boundary with the rollup coordinator.
//!
//! The dapp only ever does two things with the coordinator:
//! - `finish`: report the previous status and wait for the next request,
//! - `report`: attach an output payload to the request in flight.
//!
//! [`crate::http::HttpCoordinator`] speaks the real HTTP API; tests use
//! scripted in-memory implementations.

use async_trait::async_trait;
use thiserror::Error;

use auction_core::Status;
use auction_protocol::rollup::{RollupRequest, STATUS_NO_PENDING, STATUS_REQUEST};

/// What a `finish` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishResponse {
    /// A request to process.
    Request(RollupRequest),

    /// Nothing pending; a normal condition, call `finish` again.
    NoPending,

    /// The coordinator handed out a request whose body could not be
    /// parsed. It is consumed and must be answered with `reject`.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Worth retrying: connection failure, report timeout, 5xx.
    #[error("transient coordinator failure: {0}")]
    Transient(String),

    /// Not worth retrying: the coordinator refused the call.
    #[error("coordinator refused the call: {0}")]
    Terminal(String),
}

impl TransportError {
    pub fn is_transient(&self) -> bool {
        matches!(self, TransportError::Transient(_))
    }
}

#[async_trait]
pub trait Coordinator: Send {
    /// Finish the current request with `status` and fetch the next one.
    async fn finish(&mut self, status: Status) -> Result<FinishResponse, TransportError>;

    /// Emit a report payload for the request currently being processed.
    async fn report(&mut self, payload: String) -> Result<(), TransportError>;
}

/// Interpret the HTTP status and body of a `/finish` response.
pub fn classify_finish(http_status: u16, body: &str) -> Result<FinishResponse, TransportError> {
    match http_status {
        STATUS_REQUEST => match serde_json::from_str::<RollupRequest>(body) {
            Ok(request) => Ok(FinishResponse::Request(request)),
            Err(e) => Ok(FinishResponse::Malformed(e.to_string())),
        },
        STATUS_NO_PENDING => Ok(FinishResponse::NoPending),
        code => Err(classify_failure(code, body)),
    }
}

/// Map an unexpected HTTP status to a transport error.
pub fn classify_failure(http_status: u16, body: &str) -> TransportError {
    let detail = format!("HTTP {}: {}", http_status, body.trim());
    match http_status {
        408 | 429 | 500..=599 => TransportError::Transient(detail),
        _ => TransportError::Terminal(detail),
    }
}
