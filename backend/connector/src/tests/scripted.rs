// In-memory transport that replays queued replies and records every send.
//
// A channel with no reply left reports a zero-length receive, the same signal a
// vanished server produces.

use crate::error::transport::TransportError;
use crate::transport::{Endpoint, MessageChannel, Transport};

use protocol::ErrorLocation;
use protocol::wire::Ack;

use std::collections::{HashMap, VecDeque};
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) enum Reply {
    Message(Vec<u8>),
    Fail,
}

#[derive(Default)]
struct ScriptState {
    replies: VecDeque<Reply>,
    sent: Vec<Vec<u8>>,
    receives: usize,
    fail_sends: bool,
    disconnected: bool,
    closed: bool,
}

/// Shared handle to one scripted peer.
#[derive(Clone, Default)]
pub(crate) struct Script(Arc<Mutex<ScriptState>>);

impl Script {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.0.lock().expect("script lock poisoned")
    }

    pub(crate) fn reply(&self, message: impl Into<Vec<u8>>) -> &Self {
        self.state().replies.push_back(Reply::Message(message.into()));
        self
    }

    pub(crate) fn reply_ack(&self, status: i32) -> &Self {
        self.reply(Ack(status).encode())
    }

    pub(crate) fn fail_next_receive(&self) -> &Self {
        self.state().replies.push_back(Reply::Fail);
        self
    }

    pub(crate) fn fail_sends(&self) -> &Self {
        self.state().fail_sends = true;
        self
    }

    /// Sends fail the way they do once the peer has dropped the connection.
    pub(crate) fn disconnect(&self) -> &Self {
        self.state().disconnected = true;
        self
    }

    pub(crate) fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    pub(crate) fn receive_count(&self) -> usize {
        self.state().receives
    }

    pub(crate) fn pending_replies(&self) -> usize {
        self.state().replies.len()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state().closed
    }

    pub(crate) fn channel(&self) -> ScriptedChannel {
        ScriptedChannel {
            script: self.clone(),
        }
    }
}

pub(crate) struct ScriptedChannel {
    script: Script,
}

impl MessageChannel for ScriptedChannel {
    fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        let mut state = self.script.state();
        if state.disconnected {
            return Err(TransportError::Disconnected {
                message: "scripted peer disconnected".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if state.fail_sends {
            return Err(TransportError::Send {
                message: "scripted send failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        state.sent.push(message.to_vec());
        Ok(())
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let mut state = self.script.state();
        state.receives += 1;
        match state.replies.pop_front() {
            Some(Reply::Message(message)) => {
                let copied = message.len().min(buffer.len());
                buffer[..copied].copy_from_slice(&message[..copied]);
                Ok(copied)
            }
            Some(Reply::Fail) => Err(TransportError::Receive {
                message: "scripted receive failure".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(0),
        }
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.script.state().closed = true;
        Ok(())
    }
}

/// Hands out scripted channels by port. Unknown ports refuse to connect.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    scripts: Arc<Mutex<HashMap<u16, Script>>>,
    connected: Arc<Mutex<Vec<Endpoint>>>,
    bound: Arc<Mutex<Vec<Endpoint>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script for `port`, created on first use.
    pub(crate) fn script(&self, port: u16) -> Script {
        self.scripts
            .lock()
            .expect("transport lock poisoned")
            .entry(port)
            .or_default()
            .clone()
    }

    pub(crate) fn connected(&self) -> Vec<Endpoint> {
        self.connected.lock().expect("transport lock poisoned").clone()
    }

    pub(crate) fn bound(&self) -> Vec<Endpoint> {
        self.bound.lock().expect("transport lock poisoned").clone()
    }

    fn open(&self, endpoint: &Endpoint) -> Option<ScriptedChannel> {
        let scripts = self.scripts.lock().expect("transport lock poisoned");
        scripts.get(&endpoint.port).map(Script::channel)
    }
}

impl Transport for ScriptedTransport {
    type Channel = ScriptedChannel;

    fn connect(&self, endpoint: &Endpoint) -> Result<ScriptedChannel, TransportError> {
        let channel = self.open(endpoint).ok_or_else(|| TransportError::Connect {
            message: format!("nothing scripted on {endpoint}"),
            location: ErrorLocation::from(Location::caller()),
            source: "connection refused".into(),
        })?;
        self.connected
            .lock()
            .expect("transport lock poisoned")
            .push(endpoint.clone());
        Ok(channel)
    }

    fn bind(&self, endpoint: &Endpoint) -> Result<ScriptedChannel, TransportError> {
        let channel = self.open(endpoint).ok_or_else(|| TransportError::Bind {
            message: format!("nothing scripted on {endpoint}"),
            location: ErrorLocation::from(Location::caller()),
            source: "address unavailable".into(),
        })?;
        self.bound
            .lock()
            .expect("transport lock poisoned")
            .push(endpoint.clone());
        Ok(channel)
    }
}
