//! Session phase owned by the master orchestrator.

/// Current phase of an orchestrated session.
///
/// Exactly one value at a time, owned exclusively by the
/// `SessionOrchestrator`; every other component only reads it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    #[default]
    Idle,
    Ready,
    Battle,
    Results,
    ConnectionClosed,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Ready => "ready",
            SessionPhase::Battle => "battle",
            SessionPhase::Results => "results",
            SessionPhase::ConnectionClosed => "connectionClosed",
        }
    }

    /// Try to parse from the wire representation (case-sensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(SessionPhase::Idle),
            "ready" => Some(SessionPhase::Ready),
            "battle" => Some(SessionPhase::Battle),
            "results" => Some(SessionPhase::Results),
            "connectionClosed" => Some(SessionPhase::ConnectionClosed),
            _ => None,
        }
    }
}
