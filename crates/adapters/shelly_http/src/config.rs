//! Shelly device connection configuration.

use serde::Deserialize;

/// Configuration for the Shelly HTTP client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellyConfig {
    /// Base URL of the device, e.g. `http://192.168.33.1`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ShellyConfig {
    fn default() -> Self {
        Self {
            // The device's access-point address out of the box.
            base_url: "http://192.168.33.1".to_string(),
            request_timeout_secs: 5,
        }
    }
}
