//! Shared types for the master application.

use tokio::sync::mpsc;

/// UI-originated commands into the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The "new session" button: ask the room to restart. Local state
    /// is only reset once the room echoes the `newSession` message
    /// back.
    NewSession,
}

pub type ControlTx = mpsc::UnboundedSender<Control>;
pub type ControlRx = mpsc::UnboundedReceiver<Control>;

/// Why the orchestrator's run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// A `newSession` message arrived: the caller must rebuild the
    /// whole session from scratch.
    NewSession,

    /// The channel closed. Terminal.
    ConnectionClosed,
}
