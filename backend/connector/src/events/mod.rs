//! Inbound event channel.
//!
//! The server pushes one event record at a time and waits for an
//! acknowledgement before sending the next. Text input is followed by a second
//! message carrying the text, which gets its own acknowledgement.

use crate::error::session::SessionError;
use crate::transport::{Channel, MessageChannel};

use protocol::wire::{Ack, EVENT_RECORD_SIZE, EventRecord};
use protocol::{ErrorLocation, Event, KeyEvent, SessionId, WindowId};

use std::panic::Location;

use log::{debug, error, trace};

pub struct EventDispatcher<C: MessageChannel> {
    session_id: SessionId,
    channel: Channel<C>,
}

impl<C: MessageChannel> EventDispatcher<C> {
    pub fn new(session_id: SessionId, channel: Channel<C>) -> Self {
        Self {
            session_id,
            channel,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Block until the server sends the next event.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` for mouse, text and window-location events
    /// - `Ok(None)` for an unknown event kind (acknowledged and dropped) or a
    ///   failed exchange, which is logged. Text that is not valid UTF-8 counts
    ///   as a failed exchange.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Fatal`] once the server has gone away: a
    /// zero-length receive, a disconnected peer, or an owed acknowledgement
    /// that fails a second time.
    pub fn wait_event(&mut self) -> Result<Option<Event>, SessionError> {
        match self.next_event() {
            Ok(event) => Ok(event),
            Err(e) if e.is_fatal() => {
                error!("Event channel of session {} lost: {e}", self.session_id);
                Err(e)
            }
            Err(e) => {
                error!("Dropping event: {e}");
                Ok(None)
            }
        }
    }

    /// Iterate over events until the server goes away.
    ///
    /// Unknown and failed events are skipped. The fatal error is yielded once,
    /// then the iterator ends.
    pub fn events(&mut self) -> Events<'_, C> {
        Events {
            dispatcher: self,
            finished: false,
        }
    }

    pub fn close(mut self) -> Result<(), SessionError> {
        self.channel.close()?;
        Ok(())
    }

    fn next_event(&mut self) -> Result<Option<Event>, SessionError> {
        // A previous exchange may have failed before its acknowledgement.
        if self.channel.owes_reply()
            && let Err(e) = self.acknowledge()
        {
            return Err(SessionError::Fatal {
                message: format!(
                    "Event channel of session {} cannot acknowledge: {e}",
                    self.session_id
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut buf = [0u8; EVENT_RECORD_SIZE];
        let received = self.receive(&mut buf)?;
        self.acknowledge()?;

        let record = EventRecord::decode(&buf[..received])?;
        trace!("Event record: {record:?}");

        match record {
            EventRecord::Mouse(event) => Ok(Some(Event::Mouse(event))),
            EventRecord::WindowLocationChanged(event) => {
                Ok(Some(Event::WindowLocationChanged(event)))
            }
            EventRecord::TextInput { window_id, length } => {
                let text = self.receive_text(window_id, length)?;
                Ok(Some(Event::Key(text)))
            }
            EventRecord::Unknown { opcode, window_id } => {
                debug!("Ignoring event kind {opcode} for window {window_id}");
                Ok(None)
            }
        }
    }

    fn receive_text(&mut self, window_id: WindowId, length: usize) -> Result<KeyEvent, SessionError> {
        let mut text = vec![0u8; length];
        let received = self.receive(&mut text)?;
        self.acknowledge()?;

        text.truncate(received);
        let text = String::from_utf8(text).map_err(|e| SessionError::Protocol {
            message: format!("Text for window {window_id} is not UTF-8: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(KeyEvent { window_id, text })
    }

    #[track_caller]
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, SessionError> {
        let received = self.channel.receive(buf)?;
        if received == 0 {
            return Err(SessionError::Fatal {
                message: format!("Server closed the event channel of session {}", self.session_id),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(received)
    }

    fn acknowledge(&mut self) -> Result<(), SessionError> {
        self.channel.send(&Ack::SUCCESS.encode())?;
        Ok(())
    }
}

pub struct Events<'a, C: MessageChannel> {
    dispatcher: &'a mut EventDispatcher<C>,
    finished: bool,
}

impl<C: MessageChannel> Iterator for Events<'_, C> {
    type Item = Result<Event, SessionError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.dispatcher.wait_event() {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
