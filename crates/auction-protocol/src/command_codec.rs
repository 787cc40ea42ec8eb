// crates/auction-protocol/src/command_codec.rs

//! JSON command codec.
//!
//! Decoded payloads are JSON documents of the form:
//!
//! ```text
//! { "action": "<name>", "params": { ... } }
//! ```
//!
//! Advance actions:
//!
//! - `createAccount`: `{ "name": string, "balance": integer }`
//! - `sendBid`:       `{ "name": string, "value": integer }`
//! - `endAuction`:    `{}`
//!
//! Inspect actions:
//!
//! - `checkState`: `{}`
//!
//! `params` may be omitted when the action takes none. Integer params
//! accept either a JSON integer or a string of decimal digits
//! (`150` or `"150"`). The legacy action names `enviarLance`,
//! `encerrarLeilao` and `verificarEstado` are accepted on input.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use auction_core::{AdvanceCommand, Amount, CreateAccount, InspectQuery, SendBid};

use crate::error::ProtocolError;
use crate::payload::{decode_json, encode_json};

/// Untyped command document, as carried inside a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    pub action: String,

    #[serde(default)]
    pub params: Map<String, Value>,
}

impl RawCommand {
    pub fn new(action: impl Into<String>) -> Self {
        RawCommand {
            action: action.into(),
            params: Map::new(),
        }
    }

    /// Builder-style helper for adding a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Recognized action names.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    CreateAccount,
    SendBid,
    EndAuction,
    CheckState,
}

impl Action {
    /// Look up an action by its wire name (including legacy aliases).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "createAccount" => Some(Action::CreateAccount),
            "sendBid" | "enviarLance" => Some(Action::SendBid),
            "endAuction" | "encerrarLeilao" => Some(Action::EndAuction),
            "checkState" | "verificarEstado" => Some(Action::CheckState),
            _ => None,
        }
    }

    /// Canonical wire name.
    pub fn name(self) -> &'static str {
        match self {
            Action::CreateAccount => "createAccount",
            Action::SendBid => "sendBid",
            Action::EndAuction => "endAuction",
            Action::CheckState => "checkState",
        }
    }

    pub fn is_inspect(self) -> bool {
        matches!(self, Action::CheckState)
    }
}

// ============================================================================
// Documents ⇄ payloads
// ============================================================================

/// Decode a payload into an untyped command document.
pub fn decode(wire: &str) -> Result<RawCommand, ProtocolError> {
    decode_json(wire)
}

/// Encode an untyped command document as a payload.
pub fn encode(command: &RawCommand) -> Result<String, ProtocolError> {
    encode_json(command)
}

/// Decode a payload straight into an advance command.
pub fn decode_advance(wire: &str) -> Result<AdvanceCommand, ProtocolError> {
    parse_advance(&decode(wire)?)
}

/// Decode a payload straight into an inspect query.
pub fn decode_inspect(wire: &str) -> Result<InspectQuery, ProtocolError> {
    parse_inspect(&decode(wire)?)
}

/// Encode an advance command using canonical action names.
pub fn encode_advance(command: &AdvanceCommand) -> Result<String, ProtocolError> {
    encode(&advance_to_raw(command))
}

/// Encode an inspect query using canonical action names.
pub fn encode_inspect(query: &InspectQuery) -> Result<String, ProtocolError> {
    encode(&inspect_to_raw(query))
}

// ============================================================================
// Documents ⇄ typed commands
// ============================================================================

/// Convert a command document into a typed advance command.
///
/// Inspect-only actions are treated as unknown here.
pub fn parse_advance(raw: &RawCommand) -> Result<AdvanceCommand, ProtocolError> {
    match Action::from_name(&raw.action) {
        Some(Action::CreateAccount) => Ok(AdvanceCommand::CreateAccount(CreateAccount {
            name: name_param(&raw.params, "name")?,
            balance: amount_param(&raw.params, "balance")?,
        })),
        Some(Action::SendBid) => Ok(AdvanceCommand::SendBid(SendBid {
            name: name_param(&raw.params, "name")?,
            value: amount_param(&raw.params, "value")?,
        })),
        Some(Action::EndAuction) => Ok(AdvanceCommand::EndAuction),
        Some(Action::CheckState) | None => Err(ProtocolError::UnknownAction(raw.action.clone())),
    }
}

/// Convert a command document into a typed inspect query.
pub fn parse_inspect(raw: &RawCommand) -> Result<InspectQuery, ProtocolError> {
    match Action::from_name(&raw.action) {
        Some(Action::CheckState) => Ok(InspectQuery::CheckState),
        _ => Err(ProtocolError::UnknownAction(raw.action.clone())),
    }
}

pub fn advance_to_raw(command: &AdvanceCommand) -> RawCommand {
    match command {
        AdvanceCommand::CreateAccount(c) => RawCommand::new(Action::CreateAccount.name())
            .with_param("name", c.name.as_str())
            .with_param("balance", json!(c.balance)),
        AdvanceCommand::SendBid(b) => RawCommand::new(Action::SendBid.name())
            .with_param("name", b.name.as_str())
            .with_param("value", json!(b.value)),
        AdvanceCommand::EndAuction => RawCommand::new(Action::EndAuction.name()),
    }
}

pub fn inspect_to_raw(query: &InspectQuery) -> RawCommand {
    match query {
        InspectQuery::CheckState => RawCommand::new(Action::CheckState.name()),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn name_param(params: &Map<String, Value>, field: &'static str) -> Result<String, ProtocolError> {
    match params.get(field) {
        None => Err(ProtocolError::MissingParam(field)),
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ProtocolError::InvalidParam {
            field,
            reason: "must not be empty",
        }),
        Some(_) => Err(ProtocolError::InvalidParam {
            field,
            reason: "expected a string",
        }),
    }
}

fn amount_param(params: &Map<String, Value>, field: &'static str) -> Result<Amount, ProtocolError> {
    let invalid = ProtocolError::InvalidParam {
        field,
        reason: "expected a non-negative integer",
    };

    match params.get(field) {
        None => Err(ProtocolError::MissingParam(field)),
        Some(Value::Number(n)) => n.as_u64().ok_or(invalid),
        Some(Value::String(s)) => parse_digits(s).ok_or(invalid),
        Some(_) => Err(invalid),
    }
}

fn parse_digits(s: &str) -> Option<Amount> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<Amount>().ok()
}
