//! Blocking WebSocket transport.
//!
//! Each protocol message travels as one binary frame. A bound channel accepts
//! its single peer lazily, on the first receive.

use crate::error::transport::TransportError;
use crate::transport::{Endpoint, MessageChannel, Transport};

use protocol::ErrorLocation;

use std::net::{TcpListener, TcpStream};
use std::panic::Location;

use log::{debug, info, warn};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Error as WsError, Message, WebSocket};

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Default, Clone, Copy)]
pub struct WsTransport;

impl Transport for WsTransport {
    type Channel = WsChannel;

    fn connect(&self, endpoint: &Endpoint) -> Result<WsChannel, TransportError> {
        let url = endpoint.url()?;
        let (socket, _response) =
            tungstenite::connect(url.as_str()).map_err(|e| TransportError::Connect {
                message: format!("Failed to connect to {url}"),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        debug!("Connected to {url}");
        Ok(WsChannel {
            endpoint: endpoint.clone(),
            state: State::Open(Box::new(socket)),
        })
    }

    fn bind(&self, endpoint: &Endpoint) -> Result<WsChannel, TransportError> {
        let listener =
            TcpListener::bind(endpoint.socket_address()).map_err(|e| TransportError::Bind {
                message: format!("Failed to bind {endpoint}"),
                location: ErrorLocation::from(Location::caller()),
                source: Box::new(e),
            })?;

        debug!("Listening on {endpoint}");
        Ok(WsChannel {
            endpoint: endpoint.clone(),
            state: State::Listening(listener),
        })
    }
}

enum State {
    Listening(TcpListener),
    Open(Box<Socket>),
    Closed,
}

pub struct WsChannel {
    endpoint: Endpoint,
    state: State,
}

impl WsChannel {
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    #[track_caller]
    fn socket(&mut self) -> Result<&mut Socket, TransportError> {
        if let State::Listening(listener) = &self.state {
            let (stream, peer) = listener.accept()?;
            let socket = tungstenite::accept(MaybeTlsStream::Plain(stream)).map_err(|e| {
                TransportError::Receive {
                    message: format!("WebSocket handshake with {peer} failed: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;
            info!("Accepted peer {peer} on {}", self.endpoint);
            self.state = State::Open(Box::new(socket));
        }

        match &mut self.state {
            State::Open(socket) => Ok(socket.as_mut()),
            _ => Err(TransportError::Close {
                message: format!("{} is closed", self.endpoint),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl MessageChannel for WsChannel {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        let endpoint = self.endpoint.clone();
        let socket = self.socket()?;
        match socket.send(Message::binary(message.to_vec())) {
            Ok(()) => Ok(()),
            Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {
                Err(TransportError::Disconnected {
                    message: format!("{endpoint}: peer closed the connection"),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(WsError::Io(e)) if is_disconnect(&e) => Err(TransportError::Disconnected {
                message: format!("{endpoint}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(TransportError::Send {
                message: format!("{endpoint}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let endpoint = self.endpoint.clone();
        let socket = self.socket()?;

        loop {
            match socket.read() {
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
                Ok(Message::Close(_)) => {
                    debug!("{endpoint}: peer closed the connection");
                    return Ok(0);
                }
                Ok(message) => {
                    let data = message.into_data();
                    let copied = data.len().min(buffer.len());
                    buffer[..copied].copy_from_slice(&data[..copied]);
                    if data.len() > buffer.len() {
                        warn!(
                            "{endpoint}: message of {} bytes truncated to {copied}",
                            data.len()
                        );
                    }
                    return Ok(copied);
                }
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return Ok(0),
                Err(WsError::Io(e)) if is_disconnect(&e) => {
                    debug!("{endpoint}: connection dropped: {e}");
                    return Ok(0);
                }
                Err(e) => {
                    return Err(TransportError::Receive {
                        message: format!("{endpoint}: {e}"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let state = std::mem::replace(&mut self.state, State::Closed);
        if let State::Open(mut socket) = state {
            match socket.close(None).and_then(|()| socket.flush()) {
                Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => {}
                Err(WsError::Io(e)) if is_disconnect(&e) => {}
                Err(e) => {
                    return Err(TransportError::Close {
                        message: format!("{}: {e}", self.endpoint),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
        debug!("Closed {}", self.endpoint);
        Ok(())
    }
}

fn is_disconnect(error: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    matches!(
        error.kind(),
        ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::UnexpectedEof
    )
}
