//! Request/reply discipline for a single channel.
//!
//! A requester may not send while a reply is outstanding and may not receive
//! before it has sent. Once a reply has arrived it may keep receiving (window
//! creation reads several replies per request) until it sends again.
//!
//! A responder must receive before it sends and owes exactly one reply per
//! received message.

use crate::error::transport::TransportError;
use crate::transport::MessageChannel;

use protocol::ErrorLocation;

use std::panic::Location;

use log::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Requester,
    Responder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exchange {
    Idle,
    /// Requester sent, no reply yet.
    AwaitingReply,
    /// Requester got at least one reply to its last send.
    Replied,
    /// Responder received, has not answered yet.
    OwingReply,
}

pub struct Channel<C: MessageChannel> {
    inner: C,
    role: Role,
    exchange: Exchange,
    label: &'static str,
    closed: bool,
}

impl<C: MessageChannel> Channel<C> {
    pub fn requester(inner: C, label: &'static str) -> Self {
        Self::new(inner, Role::Requester, label)
    }

    pub fn responder(inner: C, label: &'static str) -> Self {
        Self::new(inner, Role::Responder, label)
    }

    fn new(inner: C, role: Role, label: &'static str) -> Self {
        Self {
            inner,
            role,
            exchange: Exchange::Idle,
            label,
            closed: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// True when this requester has sent and not yet seen any reply.
    pub fn awaiting_reply(&self) -> bool {
        self.exchange == Exchange::AwaitingReply
    }

    /// True when this responder has received a message it has not answered.
    pub fn owes_reply(&self) -> bool {
        self.exchange == Exchange::OwingReply
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[track_caller]
    pub fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        self.ensure_open()?;

        let next = match (self.role, self.exchange) {
            (Role::Requester, Exchange::AwaitingReply) => {
                return Err(self.discipline("send while a reply is outstanding"));
            }
            (Role::Requester, _) => Exchange::AwaitingReply,
            (Role::Responder, Exchange::OwingReply) => Exchange::Idle,
            (Role::Responder, _) => {
                return Err(self.discipline("send without a received request"));
            }
        };

        self.inner.send(message)?;
        trace!("{}: sent {} bytes", self.label, message.len());
        self.exchange = next;
        Ok(())
    }

    #[track_caller]
    pub fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        self.ensure_open()?;

        match (self.role, self.exchange) {
            (Role::Requester, Exchange::Idle) => {
                return Err(self.discipline("receive before any request was sent"));
            }
            (Role::Responder, Exchange::OwingReply) => {
                return Err(self.discipline("receive while a reply is owed"));
            }
            _ => {}
        }

        let received = self.inner.receive(buffer)?;
        trace!("{}: received {} bytes", self.label, received);

        self.exchange = match self.role {
            Role::Requester => Exchange::Replied,
            Role::Responder if received > 0 => Exchange::OwingReply,
            Role::Responder => self.exchange,
        };
        Ok(received)
    }

    /// Close the underlying channel. Further operations are rejected.
    pub fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner.close()
    }

    #[track_caller]
    fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed {
            return Err(self.discipline("channel is closed"));
        }
        Ok(())
    }

    #[track_caller]
    fn discipline(&self, what: &str) -> TransportError {
        TransportError::Discipline {
            message: format!("{}: {what}", self.label),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl<C: MessageChannel> Drop for Channel<C> {
    fn drop(&mut self) {
        if !self.closed
            && let Err(e) = self.inner.close()
        {
            warn!("{}: close on drop failed: {e}", self.label);
        }
    }
}
