//! Decode errors for the JSON wire codec.

use std::fmt;

/// Why a wire frame could not be decoded.
#[derive(Debug)]
pub enum ProtocolError {
    /// Message `type` outside the known set. Callers drop these
    /// without a state transition.
    UnknownType(String),

    /// A `state` payload carried an unrecognized session phase.
    UnknownPhase(String),

    /// An `endSession` payload carried an unrecognized winner side.
    UnknownSide(String),

    /// The line is not JSON of the expected shape.
    Json(serde_json::Error),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownType(kind) => write!(f, "unknown message type: {kind}"),
            ProtocolError::UnknownPhase(phase) => write!(f, "unknown session phase: {phase}"),
            ProtocolError::UnknownSide(side) => write!(f, "unknown side: {side}"),
            ProtocolError::Json(e) => write!(f, "malformed frame: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Json(e)
    }
}
