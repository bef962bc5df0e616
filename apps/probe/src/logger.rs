//! Probe logging.
//!
//! Log lines go to stderr in colour and to `asl-probe.log` in plain text.
//! Stdout is left to the event output.

use crate::error::ProbeError;

use protocol::ErrorLocation;

use std::fs::File;
use std::io::stderr;
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta};
use fern::colors::ColoredLevelConfig;
use humantime::{format_rfc3339, format_rfc3339_seconds};
use log::{LevelFilter, debug, warn};

const LOG_FILE_NAME: &str = "asl-probe.log";

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the global logger.
///
/// `level` overrides the default (`Debug` in debug builds, `Info` otherwise).
/// Only the first successful call installs anything; later calls warn and
/// return `Ok`.
///
/// # Errors
///
/// Fails if the log file cannot be opened or another logger is already set.
pub fn initialize(log_dir: &Path, level: Option<LevelFilter>) -> Result<(), ProbeError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        warn!("Probe logger is already installed");
        return Ok(());
    }

    let level = level.unwrap_or_else(default_level);
    if let Err(e) = install(log_dir, level) {
        INSTALLED.store(false, Ordering::SeqCst);
        return Err(e);
    }

    debug!(
        "Logging at {level} to {}",
        log_dir.join(LOG_FILE_NAME).display()
    );
    Ok(())
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[track_caller]
fn install(log_dir: &Path, level: LevelFilter) -> Result<(), ProbeError> {
    let colors = ColoredLevelConfig::new()
        .info(Green)
        .debug(Blue)
        .trace(Magenta);

    let terminal = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {} {}: {message}",
                format_rfc3339_seconds(SystemTime::now()),
                colors.color(record.level()),
                record.target(),
            ))
        })
        .chain(stderr());

    let file = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {} [{}:{}] {message}",
                format_rfc3339(SystemTime::now()),
                record.level(),
                record.target(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
            ))
        })
        .chain(open_log_file(log_dir)?);

    Dispatch::new()
        .level(level)
        .level_for("tungstenite", LevelFilter::Info)
        .chain(terminal)
        .chain(file)
        .apply()
        .map_err(|e| ProbeError::Probe {
            message: format!("Cannot install logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Open `asl-probe.log` in `log_dir` for appending.
#[track_caller]
pub(crate) fn open_log_file(log_dir: &Path) -> Result<File, ProbeError> {
    let path = log_dir.join(LOG_FILE_NAME);
    fern::log_file(&path).map_err(|e| ProbeError::Probe {
        message: format!("Cannot open log file {}: {e}", path.display()),
        location: ErrorLocation::from(Location::caller()),
    })
}
