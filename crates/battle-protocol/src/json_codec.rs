//! JSON line codec: wire frames to core types and back.

use serde::Deserialize;
use serde_json::json;

use battle_core::{
    Army, Damage, EditorState, Message, Outbound, PlayerPatch, PlayerState, SessionPhase,
    SessionResult, Side, StatePayload,
};

use crate::error::ProtocolError;
use crate::wire_types::{
    WireEditorPatch, WireEndSession, WirePatch, WirePlayerState, WireSessionResult, WireState,
};

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Session-level message, multicast to every channel subscriber.
    Message(Message),

    /// Per-side state patch feeding the role-state stream.
    SideState(Side, PlayerPatch),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Decode one JSON line into a frame.
pub fn decode_frame(line: &str) -> Result<InboundFrame, ProtocolError> {
    let envelope: Envelope = serde_json::from_str(line)?;
    match envelope.kind.as_str() {
        "state" => {
            let wire: WireState = serde_json::from_value(envelope.data)?;
            Ok(InboundFrame::Message(Message::State(state_payload(wire)?)))
        }
        "endSession" => {
            let wire: WireEndSession = serde_json::from_value(envelope.data)?;
            Ok(InboundFrame::Message(Message::EndSession(session_result(
                wire.session_result,
            )?)))
        }
        // data is empty / ignored here.
        "newSession" => Ok(InboundFrame::Message(Message::NewSession)),
        "leftState" => {
            let wire: WirePatch = serde_json::from_value(envelope.data)?;
            Ok(InboundFrame::SideState(Side::Left, player_patch(wire)))
        }
        "rightState" => {
            let wire: WirePatch = serde_json::from_value(envelope.data)?;
            Ok(InboundFrame::SideState(Side::Right, player_patch(wire)))
        }
        other => Err(ProtocolError::UnknownType(other.to_string())),
    }
}

/// Encode one outbound command as a JSON line (no trailing newline).
pub fn encode_outbound(command: &Outbound) -> String {
    let value = match command {
        Outbound::RegisterMaster { room_id } => json!({
            "type": "registerMaster",
            "data": { "roomId": room_id },
        }),
        Outbound::NewSession { room_id } => json!({
            "type": "newSession",
            "data": { "roomId": room_id },
        }),
        Outbound::LeftState(patch) => json!({
            "type": "leftState",
            "data": wire_patch(patch),
        }),
        Outbound::RightState(patch) => json!({
            "type": "rightState",
            "data": wire_patch(patch),
        }),
    };
    value.to_string()
}

fn state_payload(wire: WireState) -> Result<StatePayload, ProtocolError> {
    let mode = SessionPhase::from_str(&wire.mode)
        .ok_or_else(|| ProtocolError::UnknownPhase(wire.mode.clone()))?;
    Ok(StatePayload {
        mode,
        left: player_state(wire.left),
        right: player_state(wire.right),
    })
}

fn player_state(wire: WirePlayerState) -> PlayerState {
    let mut army = Army::empty();
    army.apply(&wire.army);
    PlayerState {
        army,
        editor: EditorState {
            code: wire.editor.code,
        },
        is_ready: wire.is_ready,
    }
}

fn session_result(wire: WireSessionResult) -> Result<SessionResult, ProtocolError> {
    let winner = Side::from_str(&wire.winner)
        .ok_or_else(|| ProtocolError::UnknownSide(wire.winner.clone()))?;
    Ok(SessionResult {
        winner,
        damage: Damage {
            left: wire.damage.left,
            right: wire.damage.right,
        },
    })
}

fn player_patch(wire: WirePatch) -> PlayerPatch {
    PlayerPatch {
        name: wire.name,
        army: wire.army,
        code: wire.editor.and_then(|editor| editor.code),
        is_ready: wire.is_ready,
    }
}

fn wire_patch(patch: &PlayerPatch) -> WirePatch {
    WirePatch {
        name: patch.name.clone(),
        army: patch.army.clone(),
        editor: patch
            .code
            .clone()
            .map(|code| WireEditorPatch { code: Some(code) }),
        is_ready: patch.is_ready,
    }
}
