//! The probe session: open one test window and report what the server sends.

use crate::cli::Args;
use crate::error::ProbeError;

use connector::{Connector, ConnectorConfig, MessageChannel, Session, WsTransport};

use protocol::{ErrorLocation, Event, NewWindow, Rect};

use std::io::{Write, stdout};
use std::panic::Location;

use log::{debug, info};

const CHECKER_SIZE: u32 = 8;
const CHECKER_LIGHT: u32 = 0xFFC0_C0C0;
const CHECKER_DARK: u32 = 0xFF40_4040;

#[derive(Debug, Clone, Copy)]
pub struct ProbeOptions {
    pub width: u32,
    pub height: u32,
    pub max_events: Option<usize>,
    pub json: bool,
}

impl From<&Args> for ProbeOptions {
    fn from(args: &Args) -> Self {
        Self {
            width: args.width,
            height: args.height,
            max_events: args.events,
            json: args.json,
        }
    }
}

/// Load config, register over WebSockets and run the probe session.
pub fn run(args: &Args) -> Result<(), ProbeError> {
    let config_dir = args.resolve_config_dir()?;
    let mut config = ConnectorConfig::load(&config_dir)?;
    if let Some(host) = &args.server_host {
        config.server_host = host.clone();
    }
    if args.write_config {
        config.save(&config_dir)?;
    }

    info!(
        "Connecting to window server at {}",
        config.registration_endpoint()
    );
    let session = Connector::new(WsTransport, config)?.register()?;

    run_session(session, &ProbeOptions::from(args), &mut stdout().lock())
}

/// Create the test window, then print events until the limit or until the
/// server goes away.
pub fn run_session<C: MessageChannel>(
    session: Session<C>,
    options: &ProbeOptions,
    out: &mut impl Write,
) -> Result<(), ProbeError> {
    let session_id = session.id();
    let (mut windows, mut events) = session.into_parts();

    let window = NewWindow::builder()
        .with_frame(Rect::new(
            0.0,
            0.0,
            f64::from(options.width),
            f64::from(options.height),
        ))
        .with_surface(checkerboard(options.width, options.height))
        .build()?;
    let window_id = windows.create_window(&window)?;
    windows.bring_window_to_front(window_id);
    info!("Session {session_id}: window {window_id} open");

    let mut seen = 0usize;
    for event in events.events() {
        let event = event?;
        if let Event::WindowLocationChanged(moved) = &event {
            debug!("Window {} now at ({}, {})", moved.window_id, moved.x, moved.y);
        }
        write_event(out, &event, options.json)?;

        seen += 1;
        if options.max_events.is_some_and(|max| seen >= max) {
            info!("Received {seen} events, stopping");
            break;
        }
    }

    windows.destroy_window(window_id);
    windows.close()?;
    events.close()?;
    Ok(())
}

/// ARGB32 checkerboard, little-endian pixels.
pub fn checkerboard(width: u32, height: u32) -> Vec<u8> {
    let mut surface = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let light = ((x / CHECKER_SIZE) + (y / CHECKER_SIZE)) % 2 == 0;
            let pixel = if light { CHECKER_LIGHT } else { CHECKER_DARK };
            surface.extend_from_slice(&pixel.to_le_bytes());
        }
    }
    surface
}

pub fn describe_event(event: &Event) -> String {
    match event {
        Event::Mouse(mouse) => format!(
            "window {} mouse {:?} {:?} at ({}, {}) screen ({}, {})",
            mouse.window_id, mouse.kind, mouse.button, mouse.x, mouse.y, mouse.abs_x, mouse.abs_y
        ),
        Event::Key(key) => format!("window {} text {:?}", key.window_id, key.text),
        Event::WindowLocationChanged(moved) => format!(
            "window {} moved to ({}, {})",
            moved.window_id, moved.x, moved.y
        ),
    }
}

#[track_caller]
fn write_event(out: &mut impl Write, event: &Event, json: bool) -> Result<(), ProbeError> {
    let line = if json {
        serde_json::to_string(event).map_err(|e| ProbeError::Probe {
            message: format!("Failed to serialize event: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?
    } else {
        describe_event(event)
    };

    writeln!(out, "{line}").map_err(|e| ProbeError::Probe {
        message: format!("Failed to write event: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
