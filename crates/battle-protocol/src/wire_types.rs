//! Serde shapes for the room server's JSON payloads.
//!
//! Every frame is one JSON object per line, wrapped in a
//! `{"type": ..., "data": ...}` envelope with camelCase fields:
//!
//! - `state`       : `{mode, left, right}` with full player states
//! - `endSession`  : `{sessionResult: {winner, damage}}`
//! - `newSession`  : data absent / ignored
//! - `leftState` / `rightState` : partial player-state patch
//!
//! Conversions to the core types live in [`crate::json_codec`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `state` message data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireState {
    pub mode: String,
    #[serde(default)]
    pub left: WirePlayerState,
    #[serde(default)]
    pub right: WirePlayerState,
}

/// Full player state as it appears inside a `state` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WirePlayerState {
    pub army: BTreeMap<u8, String>,
    pub editor: WireEditor,
    pub is_ready: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireEditor {
    pub code: String,
}

/// `endSession` message data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEndSession {
    pub session_result: WireSessionResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSessionResult {
    pub winner: String,
    pub damage: WireDamage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireDamage {
    pub left: u32,
    pub right: u32,
}

/// Partial player-state update (`leftState` / `rightState` data, and
/// the payload of the matching outbound commands).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WirePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub army: Option<BTreeMap<u8, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<WireEditorPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ready: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireEditorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
