// Round-trips between room server JSON payloads and logical frames.

use battle_core::{Message, Outbound, PlayerPatch, SessionPhase, Side, CHARACTER_NULL};
use battle_protocol::{decode_frame, encode_outbound, InboundFrame, ProtocolError};

#[test]
fn decodes_a_ready_state_message() {
    let line = r#"{
        "type": "state",
        "data": {
            "mode": "ready",
            "left": {
                "army": {"0": "knight", "1": "archer", "2": "mage", "3": "rogue"},
                "editor": {"code": "L"},
                "isReady": true
            },
            "right": {
                "army": {"0": "golem", "1": "healer", "2": "shaman", "3": "ogre"},
                "editor": {"code": "R"},
                "isReady": true
            }
        }
    }"#;

    let frame = decode_frame(line).expect("decode");
    let InboundFrame::Message(Message::State(payload)) = frame else {
        panic!("expected a state message, got {frame:?}");
    };

    assert_eq!(payload.mode, SessionPhase::Ready);
    assert_eq!(payload.left.army.get(1), Some("archer"));
    assert_eq!(payload.left.editor.code, "L");
    assert_eq!(payload.right.army.get(3), Some("ogre"));
    assert_eq!(payload.right.editor.code, "R");
    assert!(payload.right.is_ready);
}

#[test]
fn missing_player_fields_default() {
    let line = r#"{"type": "state", "data": {"mode": "idle"}}"#;

    let frame = decode_frame(line).expect("decode");
    let InboundFrame::Message(Message::State(payload)) = frame else {
        panic!("expected a state message");
    };

    assert_eq!(payload.mode, SessionPhase::Idle);
    assert_eq!(payload.left.army.get(0), Some(CHARACTER_NULL));
    assert!(payload.left.editor.code.is_empty());
    assert!(!payload.left.is_ready);
}

#[test]
fn decodes_an_end_session_message() {
    let line = r#"{
        "type": "endSession",
        "data": {"sessionResult": {"winner": "right", "damage": {"left": 250, "right": 500}}}
    }"#;

    let frame = decode_frame(line).expect("decode");
    let InboundFrame::Message(Message::EndSession(result)) = frame else {
        panic!("expected an endSession message");
    };

    assert_eq!(result.winner, Side::Right);
    assert_eq!(result.damage.left, 250);
    assert_eq!(result.damage.right, 500);
}

#[test]
fn new_session_data_is_ignored() {
    for line in [
        r#"{"type": "newSession"}"#,
        r#"{"type": "newSession", "data": {"roomId": "r1"}}"#,
    ] {
        let frame = decode_frame(line).expect("decode");
        assert_eq!(frame, InboundFrame::Message(Message::NewSession));
    }
}

#[test]
fn decodes_side_state_patches() {
    let line = r#"{"type": "rightState", "data": {"army": {"1": "archer"}}}"#;

    let frame = decode_frame(line).expect("decode");
    let InboundFrame::SideState(side, patch) = frame else {
        panic!("expected a side-state frame");
    };

    assert_eq!(side, Side::Right);
    let army = patch.army.expect("army patch");
    assert_eq!(army.get(&1).map(String::as_str), Some("archer"));
    assert!(patch.code.is_none());
    assert!(patch.is_ready.is_none());
}

#[test]
fn editor_patch_maps_to_code() {
    let line = r#"{"type": "leftState", "data": {"editor": {"code": "attack();"}, "isReady": true}}"#;

    let frame = decode_frame(line).expect("decode");
    let InboundFrame::SideState(side, patch) = frame else {
        panic!("expected a side-state frame");
    };

    assert_eq!(side, Side::Left);
    assert_eq!(patch.code.as_deref(), Some("attack();"));
    assert_eq!(patch.is_ready, Some(true));
}

#[test]
fn unknown_type_is_a_typed_error() {
    let err = decode_frame(r#"{"type": "chat", "data": {"text": "hi"}}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownType(kind) if kind == "chat"));
}

#[test]
fn unknown_phase_is_a_typed_error() {
    let err = decode_frame(r#"{"type": "state", "data": {"mode": "warmup"}}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownPhase(phase) if phase == "warmup"));
}

#[test]
fn malformed_json_is_a_typed_error() {
    let err = decode_frame("not json at all").unwrap_err();
    assert!(matches!(err, ProtocolError::Json(_)));
}

#[test]
fn encodes_outbound_commands() {
    let line = encode_outbound(&Outbound::RegisterMaster {
        room_id: "room-7".into(),
    });
    let value: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert_eq!(value["type"], "registerMaster");
    assert_eq!(value["data"]["roomId"], "room-7");

    let patch = PlayerPatch {
        army: Some([(1u8, "archer".to_string())].into_iter().collect()),
        code: Some("defend();".into()),
        ..Default::default()
    };
    let line = encode_outbound(&Outbound::LeftState(patch));
    let value: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert_eq!(value["type"], "leftState");
    assert_eq!(value["data"]["army"]["1"], "archer");
    assert_eq!(value["data"]["editor"]["code"], "defend();");
    // Absent fields stay absent rather than serializing as null.
    assert!(value["data"].get("isReady").is_none());
}

#[test]
fn outbound_patch_round_trips_through_the_inbound_side() {
    let patch = PlayerPatch {
        army: Some([(0u8, "knight".to_string())].into_iter().collect()),
        is_ready: Some(true),
        ..Default::default()
    };

    let line = encode_outbound(&Outbound::RightState(patch.clone()));
    let frame = decode_frame(&line).expect("decode");

    assert_eq!(frame, InboundFrame::SideState(Side::Right, patch));
}
