//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `shuttersync.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use shuttersync_adapter_shelly_http::ShellyConfig;
use shuttersync_app::settings::ControlSettings;
use shuttersync_domain::cover::ClosureThresholds;
use shuttersync_domain::policy::DispatchPolicy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Webhook listener settings.
    pub server: ServerConfig,
    /// Device connection settings.
    pub device: ShellyConfig,
    /// Close-then-switch flow tunables.
    pub control: ControlConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Webhook listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8480,
        }
    }
}

/// Close-then-switch flow tunables.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Per-cover closed thresholds in slot order.
    pub thresholds: [u8; 2],
    /// Position commanded when closing a cover.
    pub close_position: u8,
    /// Delay between position polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Poll budget before giving up with a timeout.
    pub max_poll_attempts: u32,
    /// Deadline for the close-command fan-in, in seconds.
    pub command_timeout_secs: u64,
    /// Active dispatch policy.
    pub policy: DispatchPolicy,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            thresholds: [15, 20],
            close_position: 6,
            poll_interval_ms: 1000,
            max_poll_attempts: 120,
            command_timeout_secs: 10,
            policy: DispatchPolicy::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read configuration file")]
    Io(#[source] std::io::Error),
    /// The config file exists but is not valid TOML.
    #[error("failed to parse configuration file")]
    Parse(#[source] toml::de::Error),
    /// A field value is out of range.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from `shuttersync.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("shuttersync.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides through a variable lookup. `SHUTTERSYNC_BIND` beats
    /// the individual host/port variables, and the specific
    /// `SHUTTERSYNC_LOG` beats the generic `RUST_LOG`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SHUTTERSYNC_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("SHUTTERSYNC_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("SHUTTERSYNC_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("SHUTTERSYNC_DEVICE_URL") {
            self.device.base_url = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SHUTTERSYNC_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.control.close_position > 100 {
            return Err(ConfigError::Validation(
                "close_position must be within 0–100".to_string(),
            ));
        }
        if self.control.thresholds.iter().any(|t| *t > 100) {
            return Err(ConfigError::Validation(
                "thresholds must be within 0–100".to_string(),
            ));
        }
        if self.control.max_poll_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_poll_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Control settings for the coordination components.
    #[must_use]
    pub fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            close_position: self.control.close_position,
            thresholds: ClosureThresholds::new(self.control.thresholds),
            poll_interval: Duration::from_millis(self.control.poll_interval_ms),
            max_poll_attempts: self.control.max_poll_attempts,
            command_timeout: Duration::from_secs(self.control.command_timeout_secs),
            policy: self.control.policy,
        }
    }
}
