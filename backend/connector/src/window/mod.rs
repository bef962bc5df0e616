//! Window command protocol.
//!
//! Every command goes out as a request record on the command channel.
//! Creation, surface update and resize also carry a payload message and wait
//! for acknowledgements. The remaining commands are posted without waiting;
//! their reply is consumed right before the next request goes out, so the
//! channel stays strictly alternating without blocking the caller.

mod registry;

pub use registry::WindowRegistry;

use crate::error::session::SessionError;
use crate::transport::{Channel, MessageChannel};

use protocol::wire::{ACK_SIZE, Ack, EVENT_RECORD_SIZE, Request, WindowAssigned};
use protocol::{ErrorLocation, NewWindow, Point, Rect, SessionId, Size, WindowId};

use std::panic::Location;

use log::{debug, info, warn};

pub struct WindowClient<C: MessageChannel> {
    session_id: SessionId,
    channel: Channel<C>,
    registry: WindowRegistry,
}

impl<C: MessageChannel> WindowClient<C> {
    pub fn new(session_id: SessionId, channel: Channel<C>) -> Self {
        Self {
            session_id,
            channel,
            registry: WindowRegistry::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn windows(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Create a window and return the id the server assigned to it.
    ///
    /// The server may repeat ids it already handed out, or send zero, before
    /// the fresh one. Those replies are skipped until an id this session has
    /// not seen arrives.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Protocol`] if the creation request is not acknowledged,
    ///   a reply cannot be decoded or the transport fails
    /// - [`SessionError::Fatal`] if the server goes away while ids are pending
    pub fn create_window(&mut self, window: &NewWindow) -> Result<WindowId, SessionError> {
        self.create(window).map_err(|e| protocol_error("window creation", e))
    }

    fn create(&mut self, window: &NewWindow) -> Result<WindowId, SessionError> {
        let request = Request::CreateWindow {
            session_id: self.session_id,
            frame: window.frame(),
            visible: window.visible(),
            raster_kind: window.raster_kind(),
            payload_size: window.payload_size(),
        };

        self.send_request(&request)?;
        self.expect_ack("window creation")?;
        self.channel.send(window.surface())?;
        debug!(
            "Sent {} surface bytes for new window in session {}",
            window.payload_size(),
            self.session_id
        );

        loop {
            let mut buf = [0u8; EVENT_RECORD_SIZE];
            let received = self.channel.receive(&mut buf)?;
            if received == 0 {
                return Err(SessionError::Fatal {
                    message: "Server closed the command channel during window creation"
                        .to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            let WindowAssigned { window_id } = WindowAssigned::decode(&buf[..received])?;
            if !window_id.is_defined() {
                debug!("Skipping undefined window id");
                continue;
            }
            if !self.registry.insert(window_id) {
                debug!("Skipping window id {window_id}, already assigned");
                continue;
            }

            info!("Created window {window_id} in session {}", self.session_id);
            return Ok(window_id);
        }
    }

    /// Replace the pixels of `region` with `surface`.
    ///
    /// Failures are logged and leave the window untouched.
    pub fn update_window_surface(&mut self, window_id: WindowId, surface: &[u8], region: Rect) {
        let request = Request::UpdateWindowSurface {
            session_id: self.session_id,
            window_id,
            region,
            payload_size: surface.len() as u64,
        };

        if let Err(e) = self.transfer(&request, surface) {
            warn!("Surface update of window {window_id} failed: {e}");
        }
    }

    /// Resize a window, supplying the surface for its new size.
    pub fn resize_window(&mut self, window_id: WindowId, surface: &[u8], size: Size) {
        let request = Request::ResizeWindow {
            session_id: self.session_id,
            window_id,
            size,
            payload_size: surface.len() as u64,
        };

        if let Err(e) = self.transfer(&request, surface) {
            warn!("Resize of window {window_id} failed: {e}");
        }
    }

    pub fn change_window_visibility(&mut self, window_id: WindowId, visible: bool) {
        self.post(Request::SetWindowVisibility {
            session_id: self.session_id,
            window_id,
            visible,
        });
    }

    pub fn bring_window_to_front(&mut self, window_id: WindowId) {
        self.post(Request::BringWindowToFront {
            session_id: self.session_id,
            window_id,
        });
    }

    pub fn move_window(&mut self, window_id: WindowId, origin: Point) {
        self.post(Request::MoveWindow {
            session_id: self.session_id,
            window_id,
            origin,
        });
    }

    /// Ask the server to destroy a window. The id stays in [`Self::windows`].
    pub fn destroy_window(&mut self, window_id: WindowId) {
        self.post(Request::DestroyWindow {
            session_id: self.session_id,
            window_id,
        });
    }

    pub fn close(mut self) -> Result<(), SessionError> {
        self.channel.close()?;
        Ok(())
    }

    fn transfer(&mut self, request: &Request, payload: &[u8]) -> Result<(), SessionError> {
        let what = request.opcode().name();
        self.exchange(request, payload, what)
            .map_err(|e| protocol_error(what, e))
    }

    fn exchange(&mut self, request: &Request, payload: &[u8], what: &str) -> Result<(), SessionError> {
        self.send_request(request)?;
        self.expect_ack(what)?;
        self.channel.send(payload)?;
        self.expect_ack(what)
    }

    fn post(&mut self, request: Request) {
        match self.send_request(&request) {
            Ok(()) => debug!(
                "Posted {} for window {}",
                request.opcode().name(),
                request.window_id()
            ),
            Err(e) => warn!("{} failed: {e}", request.opcode().name()),
        }
    }

    fn send_request(&mut self, request: &Request) -> Result<(), SessionError> {
        self.settle_pending_reply()?;
        self.channel.send(&request.encode())?;
        Ok(())
    }

    /// Consume the reply to a posted command, if it has not been read yet.
    fn settle_pending_reply(&mut self) -> Result<(), SessionError> {
        if !self.channel.awaiting_reply() {
            return Ok(());
        }

        let mut buf = [0u8; ACK_SIZE];
        let received = self.channel.receive(&mut buf)?;
        if received == 0 {
            return Err(SessionError::Fatal {
                message: "Server closed the command channel".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match Ack::decode(&buf[..received]) {
            Ok(ack) if ack.is_success() => debug!("Posted command acknowledged"),
            Ok(ack) => warn!("Posted command rejected with status {}", ack.0),
            Err(e) => warn!("Unreadable reply to posted command: {e}"),
        }
        Ok(())
    }

    #[track_caller]
    fn expect_ack(&mut self, what: &str) -> Result<(), SessionError> {
        let mut buf = [0u8; ACK_SIZE];
        let received = self.channel.receive(&mut buf)?;
        if received == 0 {
            return Err(SessionError::Protocol {
                message: format!("No acknowledgement for {what}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let ack = Ack::decode(&buf[..received])?;
        if !ack.is_success() {
            return Err(SessionError::Protocol {
                message: format!("{what} rejected with status {}", ack.0),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

/// Transport and decoding faults on the command channel are protocol errors.
/// A vanished server stays fatal.
#[track_caller]
fn protocol_error(what: &str, error: SessionError) -> SessionError {
    match error {
        SessionError::Fatal { .. } | SessionError::Protocol { .. } => error,
        other => SessionError::Protocol {
            message: format!("{what}: {other}"),
            location: ErrorLocation::from(Location::caller()),
        },
    }
}
