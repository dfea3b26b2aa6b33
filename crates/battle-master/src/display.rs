//! Read-only code display panels for the two competing sides.

use battle_core::{PlayerState, Side};

/// Renders one side's latest state snapshot.
///
/// The master never edits panel content; it arrives exclusively
/// through channel state updates.
#[derive(Debug)]
pub struct CodePanel {
    side: Side,
}

impl CodePanel {
    pub fn new(side: Side) -> Self {
        CodePanel { side }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Render the latest snapshot for this panel's side.
    pub fn set_state(&mut self, state: &PlayerState) {
        tracing::debug!(
            side = self.side.as_str(),
            code_bytes = state.editor.code.len(),
            is_ready = state.is_ready,
            "panel updated"
        );
    }
}
