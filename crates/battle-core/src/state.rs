//! Per-side player state, partial updates, and the state container.

use tokio::sync::broadcast;

use crate::army::{Army, ArmyPatch};
use crate::channel::Channel;
use crate::role::Side;

/// Code-editor portion of a player's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub code: String,
}

/// Last known snapshot of one competing side.
///
/// Written only via channel-delivered updates; the master and the
/// display panels hold read references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub army: Army,
    pub editor: EditorState,
    pub is_ready: bool,
}

/// Partial update to a player's state.
///
/// Absent fields leave the current value untouched; the army patch is
/// merged slot by slot. Malformed content (e.g. out-of-range slots)
/// is the caller's responsibility and is dropped on apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub army: Option<ArmyPatch>,
    pub code: Option<String>,
    pub is_ready: Option<bool>,
}

impl PlayerState {
    /// Merge a partial update: last writer wins per field.
    pub fn apply(&mut self, patch: &PlayerPatch) {
        if let Some(army) = &patch.army {
            self.army.apply(army);
        }
        if let Some(code) = &patch.code {
            self.editor.code = code.clone();
        }
        if let Some(is_ready) = patch.is_ready {
            self.is_ready = is_ready;
        }
    }
}

/// Mutable state holder for one connected participant.
///
/// Created at connection time and dropped on disconnect. `side` is
/// assigned exactly once; the master's container never gets one.
#[derive(Debug)]
pub struct StateContainer {
    name: String,
    side: Option<Side>,
    state: PlayerState,
    change: broadcast::Sender<PlayerState>,
    channel: Channel,
}

impl StateContainer {
    pub fn new(channel: Channel) -> Self {
        let (change, _) = broadcast::channel(16);
        StateContainer {
            name: String::new(),
            side: None,
            state: PlayerState::default(),
            change,
            channel,
        }
    }

    /// Assign the competing side. Effective only on the first call.
    pub fn assign_side(&mut self, side: Side) {
        if self.side.is_none() {
            self.side = Some(side);
        }
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Subscribe to full merged states, one per `set` call.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<PlayerState> {
        self.change.subscribe()
    }

    /// Merge a partial update into the container.
    ///
    /// Emits the full merged state on the change stream, then forwards
    /// the patch itself (not the merged state) to the channel when a
    /// competing side is assigned. Merge, emit, and forward happen as
    /// one synchronous step.
    pub fn set(&mut self, patch: PlayerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        self.state.apply(&patch);

        let _ = self.change.send(self.state.clone());

        match self.side {
            Some(Side::Left) => self.channel.send_left_state(patch),
            Some(Side::Right) => self.channel.send_right_state(patch),
            None => {}
        }
    }
}
