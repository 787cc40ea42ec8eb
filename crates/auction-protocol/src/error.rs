//! Errors raised while decoding or encoding payloads.

use thiserror::Error;

/// A payload that could not be turned into a command, or a command
/// that could not be encoded.
///
/// Decoding failures never touch auction state; the driver reports
/// them as `reject`.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload does not start with `0x`.
    #[error("payload does not start with `0x`")]
    MissingPrefix,

    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Malformed JSON, or JSON of the wrong shape.
    #[error("invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing parameter `{0}`")]
    MissingParam(&'static str),

    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParam {
        field: &'static str,
        reason: &'static str,
    },

    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

impl ProtocolError {
    /// True when the payload itself was unreadable (prefix, hex, UTF-8, JSON).
    pub fn is_malformed_payload(&self) -> bool {
        matches!(
            self,
            ProtocolError::MissingPrefix
                | ProtocolError::InvalidHex(_)
                | ProtocolError::InvalidUtf8(_)
                | ProtocolError::InvalidJson(_)
        )
    }
}
