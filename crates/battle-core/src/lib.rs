//! battle-core
//!
//! Pure session logic for the codebattle master:
//! - roles and competing sides
//! - session phases
//! - armies and player state (with partial-update merging)
//! - logical channel messages
//! - the in-process channel endpoint

pub mod role;
pub mod phase;
pub mod army;
pub mod state;
pub mod message;
pub mod channel;

pub use role::{Role, Side};
pub use phase::SessionPhase;
pub use army::{Army, ArmyPatch, ARMY_SLOTS, CHARACTER_NULL};
pub use state::{EditorState, PlayerPatch, PlayerState, StateContainer};
pub use message::{Damage, Message, SessionResult, StatePayload};
pub use channel::{channel, Channel, Outbound, OutboundRx, OutboundTx, SideState};
