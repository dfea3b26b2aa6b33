//! Simulation-engine collaborator seam.
//!
//! The engine that actually executes submitted code lives outside
//! this crate; the orchestrator drives it through [`BattleEngine`].

use battle_core::{Army, SessionPhase, SessionResult};

/// Armies injected at the `ready` to `battle` boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseParams {
    pub left_army: Army,
    pub right_army: Army,
}

/// Contract between the orchestrator and the simulation engine.
pub trait BattleEngine: Send {
    /// One-time engine setup, before any session traffic.
    fn init(&mut self);

    /// Execute both sides' submitted code. Invoked exactly once per
    /// completed battle countdown.
    fn run_code(&mut self, left_code: &str, right_code: &str);

    /// Mirror a session phase into the engine. `params` carries the
    /// injected armies at battle entry and is `None` otherwise.
    fn set_phase(&mut self, phase: SessionPhase, params: Option<&PhaseParams>);

    /// Render the final session result.
    fn show_results(&mut self, result: &SessionResult);

    /// Last phase the engine was told about.
    fn current_phase(&self) -> SessionPhase;
}

/// Engine stand-in that logs every command it receives. Useful until
/// a real renderer/executor is wired in.
#[derive(Debug, Default)]
pub struct LoggingEngine {
    phase: SessionPhase,
}

impl BattleEngine for LoggingEngine {
    fn init(&mut self) {
        tracing::info!("battle engine initialized");
    }

    fn run_code(&mut self, left_code: &str, right_code: &str) {
        tracing::info!(
            left_bytes = left_code.len(),
            right_bytes = right_code.len(),
            "running submitted code"
        );
    }

    fn set_phase(&mut self, phase: SessionPhase, _params: Option<&PhaseParams>) {
        self.phase = phase;
        tracing::info!(phase = phase.as_str(), "engine phase updated");
    }

    fn show_results(&mut self, result: &SessionResult) {
        self.phase = SessionPhase::Results;
        tracing::info!(
            winner = result.winner.as_str(),
            damage_left = result.damage.left,
            damage_right = result.damage.right,
            "session results"
        );
    }

    fn current_phase(&self) -> SessionPhase {
        self.phase
    }
}
