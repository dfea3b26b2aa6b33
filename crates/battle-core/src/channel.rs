//! In-process endpoint of the bidirectional session transport.
//!
//! [`Channel`] is the application-side handle: the master and the
//! state containers send commands through it and subscribe to the
//! multicast inbound streams. The transport feeds inbound traffic in
//! with the `deliver_*` operations and signals termination with
//! [`Channel::close`].
//!
//! Every subscriber sees inbound messages in arrival order,
//! independently of every other subscriber.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};

use crate::message::Message;
use crate::role::Side;
use crate::state::{PlayerPatch, PlayerState};

/// Commands flowing from the application out to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    RegisterMaster { room_id: String },
    NewSession { room_id: String },
    LeftState(PlayerPatch),
    RightState(PlayerPatch),
}

pub type OutboundTx = mpsc::UnboundedSender<Outbound>;
pub type OutboundRx = mpsc::UnboundedReceiver<Outbound>;

/// Full merged snapshot of one side, emitted on every state patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideState {
    pub side: Side,
    pub state: PlayerState,
}

#[derive(Debug, Default)]
struct Snapshots {
    left: PlayerState,
    right: PlayerState,
}

/// Application-side handle to the session transport. Cheap to clone;
/// all clones share the same streams.
#[derive(Debug, Clone)]
pub struct Channel {
    outbound: OutboundTx,
    messages: broadcast::Sender<Message>,
    states: broadcast::Sender<SideState>,
    closed: broadcast::Sender<()>,
    snapshots: Arc<Mutex<Snapshots>>,
}

/// Create a channel together with the outbound receiver its transport
/// drains.
pub fn channel() -> (Channel, OutboundRx) {
    let (outbound, outbound_rx) = mpsc::unbounded_channel();
    let (messages, _) = broadcast::channel(64);
    let (states, _) = broadcast::channel(64);
    let (closed, _) = broadcast::channel(4);

    let channel = Channel {
        outbound,
        messages,
        states,
        closed,
        snapshots: Arc::new(Mutex::new(Snapshots::default())),
    };
    (channel, outbound_rx)
}

impl Channel {
    // ---- application side --------------------------------------------------

    /// Claim the master role for a room.
    pub fn register_as_master(&self, room_id: &str) {
        let _ = self.outbound.send(Outbound::RegisterMaster {
            room_id: room_id.to_string(),
        });
    }

    /// Ask the room to restart the session.
    pub fn send_new_session(&self, room_id: &str) {
        let _ = self.outbound.send(Outbound::NewSession {
            room_id: room_id.to_string(),
        });
    }

    /// Forward a left-side state patch to the room.
    pub fn send_left_state(&self, patch: PlayerPatch) {
        let _ = self.outbound.send(Outbound::LeftState(patch));
    }

    /// Forward a right-side state patch to the room.
    pub fn send_right_state(&self, patch: PlayerPatch) {
        let _ = self.outbound.send(Outbound::RightState(patch));
    }

    /// Subscribe to the inbound message stream.
    pub fn subscribe_messages(&self) -> broadcast::Receiver<Message> {
        self.messages.subscribe()
    }

    /// Subscribe to the close notification. Fires once, on transport
    /// termination.
    pub fn subscribe_close(&self) -> broadcast::Receiver<()> {
        self.closed.subscribe()
    }

    /// Subscribe to per-side merged state snapshots.
    pub fn subscribe_states(&self) -> broadcast::Receiver<SideState> {
        self.states.subscribe()
    }

    // ---- transport side ----------------------------------------------------

    /// Multicast an inbound message to all subscribers.
    pub fn deliver(&self, message: Message) {
        let _ = self.messages.send(message);
    }

    /// Merge a per-side patch into the channel's snapshot for that
    /// side and multicast the full merged state.
    pub fn deliver_state_patch(&self, side: Side, patch: &PlayerPatch) {
        let state = {
            let mut guard = self
                .snapshots
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let state = match side {
                Side::Left => &mut guard.left,
                Side::Right => &mut guard.right,
            };
            state.apply(patch);
            state.clone()
        };
        let _ = self.states.send(SideState { side, state });
    }

    /// Signal transport termination.
    pub fn close(&self) {
        let _ = self.closed.send(());
    }
}
