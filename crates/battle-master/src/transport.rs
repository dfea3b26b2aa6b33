//! Newline-delimited JSON TCP transport feeding the channel.
//!
//! This module:
//! - accepts connections on the configured listener,
//! - assigns each connection a `ClientId`,
//! - spawns a per-client reader that decodes wire frames into channel
//!   deliveries,
//! - pumps outbound channel commands to every connected client.
//!
//! A client disconnect closes the channel. No reconnection happens at
//! this layer; whoever re-establishes the room starts a new channel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, RwLock};

use battle_core::{Channel, OutboundRx};
use battle_protocol::{decode_frame, encode_outbound, InboundFrame, ProtocolError};

/// Identifier for a connected client. Unique over the lifetime of the
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
}

type LineTx = mpsc::UnboundedSender<String>;
type ClientRegistry = Arc<RwLock<HashMap<ClientId, LineTx>>>;

/// Accept clients and bridge them onto the channel until the listener
/// fails.
pub async fn run(
    listener: TcpListener,
    channel: Channel,
    mut outbound: OutboundRx,
    max_clients: usize,
) -> Result<()> {
    let clients: ClientRegistry = Arc::new(RwLock::new(HashMap::new()));

    // Outbound pump: every channel command goes to every client.
    {
        let clients = clients.clone();
        tokio::spawn(async move {
            while let Some(command) = outbound.recv().await {
                let line = encode_outbound(&command);
                let guard = clients.read().await;
                for tx in guard.values() {
                    let _ = tx.send(line.clone());
                }
            }
        });
    }

    loop {
        let (stream, peer_addr) = listener.accept().await?;

        let connected = clients.read().await.len();
        if connected >= max_clients {
            tracing::warn!(%peer_addr, max_clients, "rejecting connection: client cap reached");
            continue;
        }

        let client_id = next_client_id();
        tracing::info!(client = client_id.0, %peer_addr, "client connected");

        let (line_tx, line_rx) = mpsc::unbounded_channel();
        clients.write().await.insert(client_id, line_tx);

        let clients = clients.clone();
        let channel = channel.clone();
        tokio::spawn(async move {
            let (read_half, write_half) = stream.into_split();
            spawn_writer(client_id, write_half, line_rx);

            if let Err(e) = run_reader(client_id, read_half, &channel).await {
                tracing::warn!(client = client_id.0, error = %e, "client reader failed");
            } else {
                tracing::info!(client = client_id.0, "client disconnected");
            }

            clients.write().await.remove(&client_id);
            // A session cannot continue with a side detached.
            channel.close();
        });
    }
}

fn spawn_writer(
    client_id: ClientId,
    mut write_half: OwnedWriteHalf,
    mut line_rx: mpsc::UnboundedReceiver<String>,
) {
    tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            let framed = format!("{line}\n");
            if let Err(e) = write_half.write_all(framed.as_bytes()).await {
                tracing::warn!(client = client_id.0, error = %e, "client write failed");
                break;
            }
        }
    });
}

async fn run_reader(client_id: ClientId, read_half: OwnedReadHalf, channel: &Channel) -> Result<()> {
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match decode_frame(line) {
            Ok(InboundFrame::Message(message)) => channel.deliver(message),
            Ok(InboundFrame::SideState(side, patch)) => {
                channel.deliver_state_patch(side, &patch);
            }
            // Unknown message types are dropped with no transition.
            Err(ProtocolError::UnknownType(kind)) => {
                tracing::debug!(client = client_id.0, kind, "ignoring unrecognized message");
            }
            Err(e) => {
                tracing::warn!(client = client_id.0, error = %e, "undecodable frame dropped");
            }
        }
    }

    Ok(())
}
