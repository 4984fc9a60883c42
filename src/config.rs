//! Runtime configuration: TOML file, environment overlay, compiled defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when nothing else is given.
pub const LOCAL_CONFIG_FILE: &str = "portcheck.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required settings: {}\nexample: {example}", .missing.join(", "))]
    MissingRequired {
        missing: Vec<&'static str>,
        example: String,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where [`Config::resolve`] found its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("compiled-in defaults"),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub bandwidth: BandwidthTestConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Resolve the effective configuration:
    /// 1. `explicit` (CLI flag or `PORTCHECK_CONFIG`), which must load.
    /// 2. `./portcheck.toml` if present.
    /// 3. Compiled-in defaults.
    ///
    /// The device environment variables are applied on top. Runs before
    /// logging is set up, so the source is returned for the caller to report.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let local = Path::new(LOCAL_CONFIG_FILE);
        let path = match explicit {
            Some(path) => Some(path),
            None if local.exists() => Some(local),
            None => None,
        };
        let (mut config, source) = match path {
            Some(path) => (Self::load(path)?, ConfigSource::File(path.to_path_buf())),
            None => (Self::default(), ConfigSource::Defaults),
        };
        config.device.apply_env(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    /// Check that every setting needed to reach the switch is present.
    pub fn validate_device(&self) -> Result<(), ConfigError> {
        let d = &self.device;
        let missing: Vec<&'static str> = [
            (d.port_to_test.is_empty(), "PORT_TO_TEST"),
            (d.switch_ip.is_empty(), "SWITCH_IP"),
            (d.switch_username.is_empty(), "SWITCH_USERNAME"),
            (d.switch_password.is_empty(), "SWITCH_PASSWORD"),
        ]
        .into_iter()
        .filter_map(|(absent, key)| absent.then_some(key))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingRequired {
                missing,
                example: DeviceConfig::example_invocation(),
            })
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// Target switch and the port under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Interface name on the switch, e.g. `ether3`.
    pub port_to_test: String,
    pub switch_ip: String,
    pub switch_username: String,
    #[serde(skip_serializing)]
    pub switch_password: String,
    pub ssh_port: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port_to_test: String::new(),
            switch_ip: String::new(),
            switch_username: String::new(),
            switch_password: String::new(),
            ssh_port: 22,
        }
    }
}

impl DeviceConfig {
    /// Overlay values from the environment. `lookup` is `std::env::var` in
    /// production.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("PORT_TO_TEST") {
            self.port_to_test = v;
        }
        if let Some(v) = lookup("SWITCH_IP") {
            self.switch_ip = v;
        }
        if let Some(v) = lookup("SWITCH_USERNAME") {
            self.switch_username = v;
        }
        if let Some(v) = lookup("SWITCH_PASSWORD") {
            self.switch_password = v;
        }
        if let Some(v) = lookup("SSH_PORT") {
            self.ssh_port = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SSH_PORT",
                value: v,
            })?;
        }
        Ok(())
    }

    fn example_invocation() -> String {
        "env PORT_TO_TEST=ether3 SWITCH_IP=192.168.88.2 SWITCH_USERNAME=admin \
         SWITCH_PASSWORD=admin SSH_PORT=22 portcheck run ..."
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Bandwidth test
// ---------------------------------------------------------------------------

/// Parameters passed to the device's bandwidth-test tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthTestConfig {
    /// Address of the peer switch running the bandwidth-test server.
    pub peer_address: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// `both`, `transmit` or `receive`.
    pub direction: String,
    pub duration: String,
}

impl Default for BandwidthTestConfig {
    fn default() -> Self {
        Self {
            peer_address: "192.168.88.1".to_string(),
            password: "admin".to_string(),
            direction: "both".to_string(),
            duration: "30s".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Health limits applied to a bandwidth test. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Loss is acceptable while `lost_packets < max_lost_packets`.
    pub max_lost_packets: u64,
    /// TX is acceptable while the 10-second average exceeds this (Mbit/s).
    pub min_tx_average_mbps: f64,
    /// RX is acceptable while the 10-second average exceeds this (Mbit/s).
    pub min_rx_average_mbps: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_lost_packets: 2500,
            min_tx_average_mbps: 150.0,
            min_rx_average_mbps: 150.0,
        }
    }
}

impl Thresholds {
    pub fn packet_loss_ok(&self, lost_packets: u64) -> bool {
        lost_packets < self.max_lost_packets
    }

    pub fn tx_average_ok(&self, mbps: f64) -> bool {
        mbps > self.min_tx_average_mbps
    }

    pub fn rx_average_ok(&self, mbps: f64) -> bool {
        mbps > self.min_rx_average_mbps
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Pause after the operator confirms a cabling change, letting the port
    /// renegotiate before the next command (seconds).
    pub settle_secs: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self { settle_secs: 10 }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum tracing level (`trace`, `debug`, `info`, `warn`, `error`).
    /// `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
