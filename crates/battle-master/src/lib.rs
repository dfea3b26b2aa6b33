//! battle-master
//!
//! Master-side application for codebattle sessions: owns the session
//! state machine and bridges the room transport, the simulation
//! engine, and the code display panels.

pub mod config;
pub mod types;
pub mod engine;
pub mod display;
pub mod orchestrator;
pub mod transport;
pub mod master;
