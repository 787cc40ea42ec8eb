//! Request / response bodies of the rollup coordinator HTTP API.
//!
//! ```text
//! POST {server}/finish   body: {"status": "accept" | "reject"}
//!   200 -> {"request_type": "advance_state" | "inspect_state", "data": {...}}
//!   202 -> no pending request, call again
//!
//! POST {server}/report   body: {"payload": "0x..."}
//! ```
//!
//! `data` for an advance request carries the input `payload` plus
//! block metadata; for an inspect request it carries only `payload`.

use serde::{Deserialize, Serialize};

use auction_core::Status;

pub const FINISH_PATH: &str = "/finish";
pub const REPORT_PATH: &str = "/report";

/// HTTP status returned by `/finish` when a request is attached.
pub const STATUS_REQUEST: u16 = 200;

/// HTTP status returned by `/finish` when nothing is pending.
pub const STATUS_NO_PENDING: u16 = 202;

/// Body of `POST /finish`: the status of the previous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishRequest {
    pub status: Status,
}

/// A request handed out by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request_type", content = "data", rename_all = "snake_case")]
pub enum RollupRequest {
    /// State-mutating input.
    AdvanceState(AdvanceRequest),

    /// Read-only query.
    InspectState(InspectRequest),
}

impl RollupRequest {
    pub fn payload(&self) -> &str {
        match self {
            RollupRequest::AdvanceState(a) => &a.payload,
            RollupRequest::InspectState(i) => &i.payload,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RollupRequest::AdvanceState(_) => "advance_state",
            RollupRequest::InspectState(_) => "inspect_state",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub payload: String,
}

/// Block metadata attached to advance requests.
///
/// Fields missing from the coordinator's body default to zero / empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub msg_sender: String,
    pub epoch_index: u64,
    pub input_index: u64,
    pub block_number: u64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectRequest {
    pub payload: String,
}

/// Body of `POST /report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub payload: String,
}
