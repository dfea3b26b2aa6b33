//! Logical messages delivered on the channel's inbound stream.
//!
//! These are transport-agnostic: the JSON wire encoding lives in the
//! `battle-protocol` crate.

use crate::phase::SessionPhase;
use crate::role::Side;
use crate::state::PlayerState;

/// A message delivered to every channel subscriber, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Full session state broadcast by the room.
    State(StatePayload),

    /// End-of-session notification carrying the final result.
    EndSession(SessionResult),

    /// Request to restart the session from scratch.
    NewSession,
}

/// Payload of a `state` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePayload {
    pub mode: SessionPhase,
    pub left: PlayerState,
    pub right: PlayerState,
}

/// Final outcome of one session, produced once by the simulation
/// engine on the winning side's machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub winner: Side,
    pub damage: Damage,
}

/// Total damage dealt by each side over the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub left: u32,
    pub right: u32,
}

impl Message {
    /// Convenience constructor for a `state` message.
    pub fn state(mode: SessionPhase, left: PlayerState, right: PlayerState) -> Self {
        Message::State(StatePayload { mode, left, right })
    }

    /// Convenience constructor for an `endSession` message.
    pub fn end_session(winner: Side, damage_left: u32, damage_right: u32) -> Self {
        Message::EndSession(SessionResult {
            winner,
            damage: Damage {
                left: damage_left,
                right: damage_right,
            },
        })
    }
}
