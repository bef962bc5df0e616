//! Command-line arguments and directory resolution.

use crate::error::ProbeError;

use protocol::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

const APP_DIR_NAME: &str = "asl-probe";

#[derive(Parser, Debug)]
#[command(
    name = "asl-probe",
    version,
    about = "Register with a window server, open a test window and print its events"
)]
pub struct Args {
    /// Directory holding connector.json.
    /// Defaults to {config_dir}/asl-probe
    #[arg(long, env = "ASL_PROBE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for asl-probe.log.
    /// Defaults to {data_local_dir}/asl-probe/logs
    #[arg(long, env = "ASL_PROBE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write the effective config back to connector.json before connecting.
    #[arg(long)]
    pub write_config: bool,

    /// Override the server host from the config file.
    #[arg(long)]
    pub server_host: Option<String>,

    #[arg(long, default_value_t = 320)]
    pub width: u32,

    #[arg(long, default_value_t = 240)]
    pub height: u32,

    /// Stop after this many events. Runs until the server goes away if unset.
    #[arg(short = 'n', long)]
    pub events: Option<usize>,

    /// Print events as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.verbose.then_some(LevelFilter::Trace)
    }

    #[track_caller]
    pub fn resolve_config_dir(&self) -> Result<PathBuf, ProbeError> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ProbeError::Probe {
                message: "No config directory on this platform, pass --config-dir".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    pub fn resolve_log_dir(&self) -> Result<PathBuf, ProbeError> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join("logs"))
            .ok_or_else(|| ProbeError::Probe {
                message: "No data directory on this platform, pass --log-dir".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
