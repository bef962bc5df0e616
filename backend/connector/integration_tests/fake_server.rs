//! Minimal in-process window server for loopback tests.
//!
//! Each helper drives one side of one channel with plain `tungstenite`, so the
//! connector's WebSocket transport is exercised against an independent peer.

use connector::ConnectorConfig;

use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

pub type ServerSocket = WebSocket<TcpStream>;
pub type PeerSocket = WebSocket<MaybeTlsStream<TcpStream>>;

/// Config pointing every channel at loopback ports starting at `base`.
///
/// `base`, `base + 1` are registration and monitor; commands use `base + 100 + id`
/// and events `base + 200 + id`.
pub fn loopback_config(base: u16) -> ConnectorConfig {
    ConnectorConfig {
        server_host: "127.0.0.1".to_string(),
        bind_host: "127.0.0.1".to_string(),
        registration_port: base,
        process_monitor_port: base + 1,
        command_base_port: base + 100,
        event_base_port: base + 200,
        ..ConnectorConfig::default()
    }
}

pub fn listen(port: u16) -> TcpListener {
    TcpListener::bind(("127.0.0.1", port)).expect("Failed to bind fake server port")
}

/// Accept one WebSocket client, then run `serve` on it in a background thread.
pub fn serve_one<F>(listener: TcpListener, serve: F) -> JoinHandle<()>
where
    F: FnOnce(&mut ServerSocket) + Send + 'static,
{
    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Failed to accept client");
        let mut socket = tungstenite::accept(stream).expect("WebSocket handshake failed");
        serve(&mut socket);
    })
}

pub fn read_binary<S: std::io::Read + std::io::Write>(socket: &mut WebSocket<S>) -> Vec<u8> {
    loop {
        match socket.read().expect("Failed to read from client") {
            Message::Binary(data) => return data.to_vec(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Expected binary message, got {other:?}"),
        }
    }
}

pub fn send_binary<S: std::io::Read + std::io::Write>(socket: &mut WebSocket<S>, data: &[u8]) {
    socket
        .send(Message::binary(data.to_vec()))
        .expect("Failed to send to client");
}

/// Block until the client closes its side.
pub fn wait_for_close<S: std::io::Read + std::io::Write>(socket: &mut WebSocket<S>) {
    loop {
        match socket.read() {
            Ok(Message::Close(_)) | Err(_) => return,
            Ok(_) => continue,
        }
    }
}
