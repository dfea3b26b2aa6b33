//! Top-level session loop: transport plus orchestrator lifecycle.

use anyhow::Result;
use tokio::net::TcpListener;

use battle_core::channel;

use crate::config::Config;
use crate::engine::LoggingEngine;
use crate::orchestrator::SessionOrchestrator;
use crate::transport;
use crate::types::SessionExit;

/// Run the master until its channel closes.
///
/// A `newSession` message tears the orchestrator, engine, and panels
/// down and rebuilds them from scratch; the channel and transport
/// survive across sessions.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, room = %config.room_id, "listening");

    let (chan, outbound_rx) = channel();

    {
        let chan = chan.clone();
        let max_clients = config.max_clients;
        tokio::spawn(async move {
            if let Err(e) = transport::run(listener, chan, outbound_rx, max_clients).await {
                tracing::error!(error = %e, "transport failed");
            }
        });
    }

    loop {
        let engine = Box::new(LoggingEngine::default());
        let (orchestrator, _phase_rx, _controls) =
            SessionOrchestrator::new(chan.clone(), engine, config.room_id.clone());

        match orchestrator.run().await {
            SessionExit::NewSession => {
                tracing::info!("rebuilding session state");
            }
            SessionExit::ConnectionClosed => {
                tracing::info!("session over: connection closed");
                return Ok(());
            }
        }
    }
}
