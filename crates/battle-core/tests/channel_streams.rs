// Multicast guarantees of the channel: independent subscribers, each
// seeing arrivals in order, plus snapshot merging on the per-side
// state stream.

use battle_core::{
    channel, ArmyPatch, Message, PlayerPatch, SessionPhase, Side, PlayerState, CHARACTER_NULL,
};

#[tokio::test]
async fn every_subscriber_sees_messages_in_arrival_order() {
    let (chan, _outbound_rx) = channel();
    let mut first = chan.subscribe_messages();
    let mut second = chan.subscribe_messages();

    chan.deliver(Message::NewSession);
    chan.deliver(Message::end_session(Side::Right, 250, 500));
    chan.deliver(Message::state(
        SessionPhase::Idle,
        PlayerState::default(),
        PlayerState::default(),
    ));

    for subscriber in [&mut first, &mut second] {
        assert_eq!(subscriber.recv().await.unwrap(), Message::NewSession);
        assert!(matches!(
            subscriber.recv().await.unwrap(),
            Message::EndSession(_)
        ));
        assert!(matches!(subscriber.recv().await.unwrap(), Message::State(_)));
    }
}

#[tokio::test]
async fn state_patches_merge_into_full_snapshots() {
    let (chan, _outbound_rx) = channel();
    let mut states = chan.subscribe_states();

    let army: ArmyPatch = [(1u8, "archer".to_string())].into_iter().collect();
    chan.deliver_state_patch(
        Side::Right,
        &PlayerPatch {
            army: Some(army),
            ..Default::default()
        },
    );

    let update = states.recv().await.unwrap();
    assert_eq!(update.side, Side::Right);
    assert_eq!(update.state.army.get(1), Some("archer"));
    assert_eq!(update.state.army.get(0), Some(CHARACTER_NULL));

    // A later patch on another field keeps the merged army.
    chan.deliver_state_patch(
        Side::Right,
        &PlayerPatch {
            code: Some("attack();".into()),
            ..Default::default()
        },
    );

    let update = states.recv().await.unwrap();
    assert_eq!(update.state.army.get(1), Some("archer"));
    assert_eq!(update.state.editor.code, "attack();");
}

#[tokio::test]
async fn sides_keep_separate_snapshots() {
    let (chan, _outbound_rx) = channel();
    let mut states = chan.subscribe_states();

    chan.deliver_state_patch(
        Side::Left,
        &PlayerPatch {
            is_ready: Some(true),
            ..Default::default()
        },
    );
    chan.deliver_state_patch(Side::Right, &PlayerPatch::default());

    let left = states.recv().await.unwrap();
    let right = states.recv().await.unwrap();
    assert!(left.state.is_ready);
    assert!(!right.state.is_ready);
}

#[tokio::test]
async fn close_notifies_subscribers() {
    let (chan, _outbound_rx) = channel();
    let mut closed = chan.subscribe_close();

    chan.close();

    assert!(closed.recv().await.is_ok());
}
