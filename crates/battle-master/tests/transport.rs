// Socket-level smoke tests for the JSON-lines transport.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use battle_core::{channel, Message, Side};
use battle_master::transport;

async fn start_transport() -> (std::net::SocketAddr, battle_core::Channel) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (chan, outbound_rx) = channel();

    let transport_chan = chan.clone();
    tokio::spawn(async move {
        let _ = transport::run(listener, transport_chan, outbound_rx, 4).await;
    });

    (addr, chan)
}

#[tokio::test]
async fn inbound_lines_become_channel_traffic() {
    let (addr, chan) = start_transport().await;
    let mut messages = chan.subscribe_messages();
    let mut states = chan.subscribe_states();

    let mut client = TcpStream::connect(addr).await.unwrap();
    client
        .write_all(b"{\"type\":\"newSession\"}\n")
        .await
        .unwrap();
    client
        .write_all(b"{\"type\":\"rightState\",\"data\":{\"army\":{\"1\":\"archer\"}}}\n")
        .await
        .unwrap();

    assert_eq!(messages.recv().await.unwrap(), Message::NewSession);

    let update = states.recv().await.unwrap();
    assert_eq!(update.side, Side::Right);
    assert_eq!(update.state.army.get(1), Some("archer"));
}

#[tokio::test]
async fn unrecognized_frames_are_dropped_silently() {
    let (addr, chan) = start_transport().await;
    let mut messages = chan.subscribe_messages();

    let mut client = TcpStream::connect(addr).await.unwrap();
    client
        .write_all(b"{\"type\":\"chat\",\"data\":{\"text\":\"gl hf\"}}\nnot json\n{\"type\":\"newSession\"}\n")
        .await
        .unwrap();

    // Only the recognized frame comes through.
    assert_eq!(messages.recv().await.unwrap(), Message::NewSession);
}

#[tokio::test]
async fn outbound_commands_reach_every_client() {
    let (addr, chan) = start_transport().await;

    let first = TcpStream::connect(addr).await.unwrap();
    let second = TcpStream::connect(addr).await.unwrap();
    // Give the accept loop a moment to register both clients.
    tokio::task::yield_now().await;
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    chan.send_new_session("room-9");

    for client in [first, second] {
        let (read_half, _write_half) = client.into_split();
        let mut lines = BufReader::new(read_half).lines();
        let line = lines.next_line().await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "newSession");
        assert_eq!(value["data"]["roomId"], "room-9");
    }
}

#[tokio::test]
async fn client_disconnect_closes_the_channel() {
    let (addr, chan) = start_transport().await;
    let mut closed = chan.subscribe_close();

    let client = TcpStream::connect(addr).await.unwrap();
    drop(client);

    assert!(closed.recv().await.is_ok());
}
