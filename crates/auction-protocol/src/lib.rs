//! auction-protocol
//!
//! Wire-level encoding/decoding for the auction dapp.
//!
//! This crate is responsible for turning logical auction commands
//! (`auction_core::AdvanceCommand` / `InspectQuery`) and snapshots into
//! the coordinator's payload strings and back again.
//!
//! - [`payload`]       : `"0x" + hex(utf8(json))` payload encoding
//! - [`command_codec`] : JSON documents ⇄ typed commands
//! - [`rollup`]        : request / response bodies of the coordinator HTTP API

pub mod command_codec;
pub mod error;
pub mod payload;
pub mod rollup;

pub use error::ProtocolError;

pub use payload::{decode_json, encode_json, PAYLOAD_PREFIX};

pub use command_codec::{
    decode,
    decode_advance,
    decode_inspect,
    encode,
    encode_advance,
    encode_inspect,
    parse_advance,
    parse_inspect,
    Action,
    RawCommand,
};
