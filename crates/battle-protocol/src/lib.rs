//! battle-protocol
//!
//! Wire-level encoding/decoding for the codebattle channel.
//!
//! This crate is responsible for turning logical channel traffic
//! (`battle_core::Message`, per-side state patches, outbound
//! commands) into newline-delimited JSON lines and back again.
//!
//! - [`wire_types`] : serde shapes matching the room server payloads
//! - [`json_codec`] : frame decode / command encode

pub mod wire_types;
pub mod json_codec;
pub mod error;

pub use error::ProtocolError;
pub use json_codec::{decode_frame, encode_outbound, InboundFrame};
