use asl_probe::cli::Args;
use asl_probe::error::ProbeError;
use asl_probe::logger::initialize as LoggerInitialize;
use asl_probe::probe::run;

use protocol::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();

    match start(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_fatal() {
                error!("Window server went away: {e}");
            } else {
                error!("{e}");
            }
            eprintln!("asl-probe: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start(args: &Args) -> Result<(), ProbeError> {
    let log_dir = args.resolve_log_dir()?;

    // Ensure log directory exists
    create_dir_all(&log_dir).map_err(|e| ProbeError::Probe {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, args.log_level())?;

    info!("asl-probe starting");
    info!("Log directory: {}", log_dir.display());

    run(args)
}
