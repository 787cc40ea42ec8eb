// crates/auction-protocol/src/payload.rs

//! Payload encoding used by the rollup coordinator.
//!
//! Every payload is a string of the form:
//!
//! ```text
//! "0x" + hex(utf8(json))
//! ```
//!
//! Hex digits are accepted in either case on input; output is always
//! lowercase. Re-encoding a decoded document is not guaranteed to be
//! byte-identical (JSON key order / whitespace may change), but it
//! always decodes back to the same document.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ProtocolError;

/// Fixed prefix of every payload string.
pub const PAYLOAD_PREFIX: &str = "0x";

/// Strip the prefix and decode the hex body into raw bytes.
pub fn decode_hex(wire: &str) -> Result<Vec<u8>, ProtocolError> {
    let body = wire
        .strip_prefix(PAYLOAD_PREFIX)
        .ok_or(ProtocolError::MissingPrefix)?;
    Ok(hex::decode(body)?)
}

/// Hex-encode raw bytes and prepend the prefix.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("{}{}", PAYLOAD_PREFIX, hex::encode(bytes))
}

/// Decode a payload into its UTF-8 text.
pub fn decode_text(wire: &str) -> Result<String, ProtocolError> {
    Ok(String::from_utf8(decode_hex(wire)?)?)
}

/// Encode UTF-8 text as a payload.
pub fn encode_text(text: &str) -> String {
    encode_hex(text.as_bytes())
}

/// Decode a payload into any deserializable document.
///
/// `serde_json::Value` gives the untyped document.
pub fn decode_json<T: DeserializeOwned>(wire: &str) -> Result<T, ProtocolError> {
    let text = decode_text(wire)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize a document to compact JSON and encode it as a payload.
pub fn encode_json<T: Serialize + ?Sized>(document: &T) -> Result<String, ProtocolError> {
    let text = serde_json::to_string(document)?;
    Ok(encode_text(&text))
}
