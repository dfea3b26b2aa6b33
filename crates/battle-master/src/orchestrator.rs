//! Master-side session state machine.
//!
//! A single task owns the session phase and drives every transition:
//! - mirrors inbound `state` messages into the engine,
//! - runs the ready / battle / run-code countdown,
//! - guards duplicate `endSession` notifications,
//! - escalates `newSession` and channel close to the caller.
//!
//! The countdown listens on its own subscription to the message
//! stream. A fresh `ready` message cancels any pending countdown and
//! restarts it, so at most one run-code command fires per session
//! setup, carrying the codes of the latest `ready` payload.

use std::future::pending;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Duration, Instant};

use battle_core::{
    Army, Channel, Message, PlayerState, SessionPhase, SessionResult, Side, SideState,
    StatePayload,
};

use crate::display::CodePanel;
use crate::engine::{BattleEngine, PhaseParams};
use crate::types::{Control, ControlRx, ControlTx, SessionExit};

/// Delay between the `ready` signal and the battle phase.
const BATTLE_DELAY: Duration = Duration::from_millis(2000);

/// Delay between the battle phase and code execution.
const RUN_CODE_DELAY: Duration = Duration::from_millis(1000);

/// Default armies injected into the engine at battle start.
///
/// Mutated only by the orchestrator, at the ready/battle boundary;
/// everything else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultArmies {
    pub left: Army,
    pub right: Army,
}

enum CountdownStep {
    StartBattle {
        left_army: Army,
        right_army: Army,
    },
    RunCode {
        left_code: String,
        right_code: String,
    },
}

/// Two-stage timer armed by a `ready` state payload.
#[derive(Debug, Default)]
struct Countdown {
    payload: Option<StatePayload>,
    deadline: Option<Instant>,
    battle_started: bool,
}

impl Countdown {
    /// Arm (or re-arm) from a fresh `ready` payload. Any pending
    /// stage is discarded.
    fn arm(&mut self, payload: StatePayload) {
        self.payload = Some(payload);
        self.deadline = Some(Instant::now() + BATTLE_DELAY);
        self.battle_started = false;
    }

    fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Advance past an expired deadline.
    fn fire(&mut self) -> Option<CountdownStep> {
        if !self.battle_started {
            let payload = self.payload.as_ref()?;
            self.battle_started = true;
            self.deadline = Some(Instant::now() + RUN_CODE_DELAY);
            return Some(CountdownStep::StartBattle {
                left_army: payload.left.army.clone(),
                right_army: payload.right.army.clone(),
            });
        }

        self.deadline = None;
        let payload = self.payload.take()?;
        Some(CountdownStep::RunCode {
            left_code: payload.left.editor.code,
            right_code: payload.right.editor.code,
        })
    }
}

/// One turn of the run loop, produced by the select below. Handling
/// happens outside the select so every handler gets `&mut self`.
enum Event {
    Message(Result<Message, RecvError>),
    CountdownSource(Result<Message, RecvError>),
    SideState(Result<SideState, RecvError>),
    Closed,
    Timer,
    Control(Option<Control>),
}

/// Master-side session orchestrator. Sole owner of the session phase.
pub struct SessionOrchestrator {
    channel: Channel,
    engine: Box<dyn BattleEngine>,
    left_panel: CodePanel,
    right_panel: CodePanel,
    room_id: String,
    phase: SessionPhase,
    phase_tx: watch::Sender<SessionPhase>,
    armies: DefaultArmies,
    controls: ControlRx,
    // Keeps the control stream open even if every UI handle is
    // dropped, so `controls.recv()` never settles into a closed state.
    _control_tx: ControlTx,
    left_ready_seen: bool,
    right_ready_seen: bool,
}

impl SessionOrchestrator {
    /// Wire up a new session.
    ///
    /// Initializes the engine, registers this process as the room
    /// master, and resets both default armies to empty. Returns the
    /// orchestrator together with the phase watch (the outward
    /// presentation hook) and the UI control sender.
    pub fn new(
        channel: Channel,
        mut engine: Box<dyn BattleEngine>,
        room_id: impl Into<String>,
    ) -> (Self, watch::Receiver<SessionPhase>, ControlTx) {
        let room_id = room_id.into();

        engine.init();
        channel.register_as_master(&room_id);

        let (phase_tx, phase_rx) = watch::channel(SessionPhase::Idle);
        let (control_tx, controls) = mpsc::unbounded_channel();

        let orchestrator = SessionOrchestrator {
            channel,
            engine,
            left_panel: CodePanel::new(Side::Left),
            right_panel: CodePanel::new(Side::Right),
            room_id,
            phase: SessionPhase::Idle,
            phase_tx,
            armies: DefaultArmies::default(),
            controls,
            _control_tx: control_tx.clone(),
            left_ready_seen: false,
            right_ready_seen: false,
        };
        (orchestrator, phase_rx, control_tx)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Default armies last injected at battle start.
    pub fn armies(&self) -> &DefaultArmies {
        &self.armies
    }

    /// Drive the session until it has to be rebuilt or the channel
    /// closes. Single task: every handler runs to completion before
    /// the next event is taken.
    pub async fn run(mut self) -> SessionExit {
        let mut messages = self.channel.subscribe_messages();
        let mut ready_messages = self.channel.subscribe_messages();
        let mut states = self.channel.subscribe_states();
        let mut closed = self.channel.subscribe_close();
        let mut countdown = Countdown::default();

        loop {
            let deadline = countdown.deadline();
            let timer = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => pending::<()>().await,
                }
            };

            let event = tokio::select! {
                msg = messages.recv() => Event::Message(msg),
                msg = ready_messages.recv() => Event::CountdownSource(msg),
                update = states.recv() => Event::SideState(update),
                _ = closed.recv() => Event::Closed,
                _ = timer => Event::Timer,
                control = self.controls.recv() => Event::Control(control),
            };

            match event {
                Event::Message(Ok(message)) => {
                    if let Some(exit) = self.dispatch(message) {
                        return exit;
                    }
                }
                Event::Message(Err(RecvError::Lagged(skipped))) => {
                    tracing::warn!(skipped, "message stream lagged");
                }
                Event::Message(Err(RecvError::Closed)) => return self.on_close(),
                Event::CountdownSource(Ok(Message::State(payload)))
                    if payload.mode == SessionPhase::Ready =>
                {
                    tracing::info!("both sides ready, arming battle countdown");
                    countdown.arm(payload);
                }
                Event::CountdownSource(_) => {}
                Event::SideState(Ok(update)) => self.on_side_state(update),
                Event::SideState(Err(_)) => {}
                Event::Closed => return self.on_close(),
                Event::Timer => {
                    if let Some(step) = countdown.fire() {
                        self.on_countdown(step);
                    }
                }
                Event::Control(Some(control)) => self.on_control(control),
                Event::Control(None) => {}
            }
        }
    }

    /// General message dispatch: phase mirroring, the end-of-session
    /// guard, and session-reset escalation. Unrecognized traffic
    /// never reaches this point; the transport drops it at decode
    /// time.
    fn dispatch(&mut self, message: Message) -> Option<SessionExit> {
        match message {
            Message::State(payload) => {
                self.apply_phase(payload.mode, None);
                None
            }
            Message::EndSession(result) => {
                self.on_end_session(&result);
                None
            }
            Message::NewSession => {
                tracing::info!("new session requested, reloading");
                Some(SessionExit::NewSession)
            }
        }
    }

    /// Update the owned phase and the outward presentation hook.
    fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
        let _ = self.phase_tx.send(phase);
    }

    /// Phase-mirroring path: owned phase, presentation hook, engine.
    fn apply_phase(&mut self, phase: SessionPhase, params: Option<&PhaseParams>) {
        self.set_phase(phase);
        self.engine.set_phase(phase, params);
    }

    fn on_end_session(&mut self, result: &SessionResult) {
        if self.phase == SessionPhase::Results {
            tracing::debug!("duplicate endSession ignored");
            return;
        }
        self.engine.show_results(result);
        self.set_phase(SessionPhase::Results);
    }

    fn on_countdown(&mut self, step: CountdownStep) {
        match step {
            CountdownStep::StartBattle {
                left_army,
                right_army,
            } => {
                self.armies.left = left_army;
                self.armies.right = right_army;
                let params = PhaseParams {
                    left_army: self.armies.left.clone(),
                    right_army: self.armies.right.clone(),
                };
                self.apply_phase(SessionPhase::Battle, Some(&params));
            }
            CountdownStep::RunCode {
                left_code,
                right_code,
            } => {
                tracing::info!("battle countdown complete, executing submitted code");
                self.engine.run_code(&left_code, &right_code);
            }
        }
    }

    fn on_side_state(&mut self, update: SideState) {
        let SideState { side, state } = update;
        self.note_ready(side, &state);
        match side {
            Side::Left => self.left_panel.set_state(&state),
            Side::Right => self.right_panel.set_state(&state),
        }
    }

    /// Log the first ready signal per side.
    fn note_ready(&mut self, side: Side, state: &PlayerState) {
        let seen = match side {
            Side::Left => &mut self.left_ready_seen,
            Side::Right => &mut self.right_ready_seen,
        };
        if state.is_ready && !*seen {
            *seen = true;
            tracing::info!(side = side.as_str(), "side is ready");
        }
    }

    fn on_control(&mut self, control: Control) {
        match control {
            Control::NewSession => self.channel.send_new_session(&self.room_id),
        }
    }

    fn on_close(&mut self) -> SessionExit {
        tracing::warn!("channel closed");
        self.apply_phase(SessionPhase::ConnectionClosed, None);
        SessionExit::ConnectionClosed
    }
}
