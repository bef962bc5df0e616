use crate::error::config::ConfigError;
use crate::transport::Endpoint;
use crate::{DEFAULT_BIND_HOST, DEFAULT_SERVER_HOST};

use protocol::{ErrorLocation, SessionId};

use std::panic::Location;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "connector.json";
const CONFIG_VERSION: u32 = 1;

/// Where the connector finds the window server.
///
/// The registration and process-monitor endpoints are fixed. The command and
/// event endpoints are per session: their port is the base port plus the
/// session id handed out at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_server_host")]
    pub server_host: String,

    /// Interface the event channel listens on.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    #[serde(default = "default_registration_port")]
    pub registration_port: u16,

    #[serde(default = "default_process_monitor_port")]
    pub process_monitor_port: u16,

    #[serde(default = "default_command_base_port")]
    pub command_base_port: u16,

    #[serde(default = "default_event_base_port")]
    pub event_base_port: u16,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server_host: default_server_host(),
            bind_host: default_bind_host(),
            registration_port: default_registration_port(),
            process_monitor_port: default_process_monitor_port(),
            command_base_port: default_command_base_port(),
            event_base_port: default_event_base_port(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_server_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}
fn default_bind_host() -> String {
    DEFAULT_BIND_HOST.to_string()
}
fn default_registration_port() -> u16 {
    9000
}
fn default_process_monitor_port() -> u16 {
    9001
}
fn default_command_base_port() -> u16 {
    11000
}
fn default_event_base_port() -> u16 {
    10000
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ConnectorConfig {
    /// Load config from {config_dir}/connector.json.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ConnectorConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/connector.json using temp file + rename.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if self.server_host.trim().is_empty() || self.bind_host.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "server_host and bind_host cannot be empty".to_string(),
            });
        }

        let ports = [
            ("registration_port", self.registration_port),
            ("process_monitor_port", self.process_monitor_port),
            ("command_base_port", self.command_base_port),
            ("event_base_port", self.event_base_port),
        ];
        if let Some((name, _)) = ports.iter().find(|(_, port)| *port == 0) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{name} cannot be 0"),
            });
        }

        if self.registration_port == self.process_monitor_port {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "registration_port and process_monitor_port are both {}",
                    self.registration_port
                ),
            });
        }

        if self.command_base_port == self.event_base_port {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "command_base_port and event_base_port are both {}",
                    self.command_base_port
                ),
            });
        }

        Ok(())
    }

    pub fn registration_endpoint(&self) -> Endpoint {
        Endpoint::new(&self.server_host, self.registration_port)
    }

    pub fn process_monitor_endpoint(&self) -> Endpoint {
        Endpoint::new(&self.server_host, self.process_monitor_port)
    }

    /// Endpoint the command channel connects to: `command_base_port + session id`.
    #[track_caller]
    pub fn command_endpoint(&self, session_id: SessionId) -> Result<Endpoint, ConfigError> {
        let port = session_port(self.command_base_port, session_id)?;
        Ok(Endpoint::new(&self.server_host, port))
    }

    /// Endpoint the event channel binds: `event_base_port + session id`.
    #[track_caller]
    pub fn event_endpoint(&self, session_id: SessionId) -> Result<Endpoint, ConfigError> {
        let port = session_port(self.event_base_port, session_id)?;
        Ok(Endpoint::new(&self.bind_host, port))
    }
}

#[track_caller]
fn session_port(base: u16, session_id: SessionId) -> Result<u16, ConfigError> {
    u32::from(base)
        .checked_add(session_id.0)
        .and_then(|port| u16::try_from(port).ok())
        .ok_or_else(|| ConfigError::PortRange {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("base port {base} + session {session_id} exceeds 65535"),
        })
}
