//! Registration handshake and the resulting session.
//!
//! 1. Register this process on the registration channel and receive a
//!    session id.
//! 2. Report `(pid, session id)` to the process monitor and wait for its ack.
//! 3. Connect the command channel and bind the event channel on ports derived
//!    from the session id.
//!
//! Any failure during the handshake is fatal: there is no session to fall back
//! to.

use crate::config::ConnectorConfig;
use crate::error::ConnectorError;
use crate::error::session::SessionError;
use crate::events::EventDispatcher;
use crate::transport::{Channel, MessageChannel, Transport};
use crate::window::WindowClient;

use protocol::wire::{ACK_SIZE, Ack, EVENT_RECORD_SIZE, LivenessNotice, Request, SessionAssigned};
use protocol::{ErrorLocation, SessionId};

use std::fmt::Display;
use std::panic::Location;

use log::{debug, error, info};

/// Handshake channels, connected but not yet registered.
pub struct Connector<T: Transport> {
    transport: T,
    config: ConnectorConfig,
    registration: Channel<T::Channel>,
    process_monitor: Channel<T::Channel>,
}

impl<T: Transport> Connector<T> {
    /// Connect to the registration and process-monitor endpoints.
    pub fn new(transport: T, config: ConnectorConfig) -> Result<Self, ConnectorError> {
        config.validate()?;

        let registration_endpoint = config.registration_endpoint();
        let registration =
            Channel::requester(transport.connect(&registration_endpoint)?, "registration");
        debug!("Registration channel connected to {registration_endpoint}");

        let monitor_endpoint = config.process_monitor_endpoint();
        let process_monitor =
            Channel::requester(transport.connect(&monitor_endpoint)?, "process-monitor");
        debug!("Process-monitor channel connected to {monitor_endpoint}");

        Ok(Self {
            transport,
            config,
            registration,
            process_monitor,
        })
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Register the current process.
    pub fn register(self) -> Result<Session<T::Channel>, SessionError> {
        self.register_as(std::process::id())
    }

    /// Register on behalf of `pid`.
    ///
    /// # Errors
    ///
    /// Every failure is [`SessionError::Fatal`].
    pub fn register_as(mut self, pid: u32) -> Result<Session<T::Channel>, SessionError> {
        info!("Registering process {pid}");

        let session_id = self.request_session(pid)?;
        info!("Assigned session {session_id}");

        self.announce_liveness(pid, session_id)?;
        debug!("Process monitor acknowledged session {session_id}");

        let command_endpoint = self
            .config
            .command_endpoint(session_id)
            .map_err(|e| fatal("Command endpoint", e))?;
        let event_endpoint = self
            .config
            .event_endpoint(session_id)
            .map_err(|e| fatal("Event endpoint", e))?;

        let command = self
            .transport
            .connect(&command_endpoint)
            .map_err(|e| fatal("Command channel", e))?;
        debug!("Command channel connected to {command_endpoint}");

        let event = self
            .transport
            .bind(&event_endpoint)
            .map_err(|e| fatal("Event channel", e))?;
        debug!("Event channel bound on {event_endpoint}");

        self.registration
            .close()
            .map_err(|e| fatal("Closing registration channel", e))?;
        self.process_monitor
            .close()
            .map_err(|e| fatal("Closing process-monitor channel", e))?;

        info!("Session {session_id} established");
        Ok(Session {
            id: session_id,
            windows: WindowClient::new(session_id, Channel::requester(command, "command")),
            dispatcher: EventDispatcher::new(session_id, Channel::responder(event, "event")),
        })
    }

    fn request_session(&mut self, pid: u32) -> Result<SessionId, SessionError> {
        self.registration
            .send(&Request::Register { pid }.encode())
            .map_err(|e| fatal("Registration request", e))?;

        let mut buf = [0u8; EVENT_RECORD_SIZE];
        let received = self
            .registration
            .receive(&mut buf)
            .map_err(|e| fatal("Registration reply", e))?;
        if received == 0 {
            return Err(fatal("Registration reply", "server closed the channel"));
        }

        let reply = SessionAssigned::decode(&buf[..received])
            .map_err(|e| fatal("Registration reply", e))?;
        Ok(reply.session_id)
    }

    fn announce_liveness(&mut self, pid: u32, session_id: SessionId) -> Result<(), SessionError> {
        let notice = LivenessNotice { pid, session_id };
        self.process_monitor
            .send(&notice.encode())
            .map_err(|e| fatal("Liveness notice", e))?;

        let mut buf = [0u8; ACK_SIZE];
        let received = self
            .process_monitor
            .receive(&mut buf)
            .map_err(|e| fatal("Liveness acknowledgement", e))?;
        if received == 0 {
            return Err(fatal("Liveness acknowledgement", "server closed the channel"));
        }

        let ack =
            Ack::decode(&buf[..received]).map_err(|e| fatal("Liveness acknowledgement", e))?;
        if !ack.is_success() {
            return Err(fatal(
                "Liveness acknowledgement",
                format!("rejected with status {}", ack.0),
            ));
        }
        Ok(())
    }
}

#[track_caller]
fn fatal(stage: &str, cause: impl Display) -> SessionError {
    let error = SessionError::Fatal {
        message: format!("{stage} failed: {cause}"),
        location: ErrorLocation::from(Location::caller()),
    };
    error!("{error}");
    error
}

/// A registered session: a command side and an event side.
pub struct Session<C: MessageChannel> {
    id: SessionId,
    windows: WindowClient<C>,
    dispatcher: EventDispatcher<C>,
}

impl<C: MessageChannel> Session<C> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn windows(&mut self) -> &mut WindowClient<C> {
        &mut self.windows
    }

    pub fn dispatcher(&mut self) -> &mut EventDispatcher<C> {
        &mut self.dispatcher
    }

    /// Split into halves that can be moved to different threads.
    pub fn into_parts(self) -> (WindowClient<C>, EventDispatcher<C>) {
        (self.windows, self.dispatcher)
    }

    /// Close both channels. The event channel is closed even if closing the
    /// command channel fails; the first error is returned.
    pub fn close(self) -> Result<(), SessionError> {
        let id = self.id;
        let windows = self.windows.close();
        let events = self.dispatcher.close();
        info!("Session {id} closed");
        windows.and(events)
    }
}
