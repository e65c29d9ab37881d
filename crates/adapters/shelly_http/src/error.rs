//! Shelly adapter error types.

use shuttersync_domain::error::ControlError;

/// Errors specific to the Shelly HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum ShellyError {
    /// The configured base URL could not be parsed.
    #[error("invalid device base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP exchange failed before a usable body arrived.
    #[error("HTTP request to the device failed")]
    Http(#[source] reqwest::Error),

    /// The device answered the RPC with an error object.
    #[error("device RPC error {code}: {message}")]
    Rpc {
        /// Device-reported error code.
        code: i32,
        /// Device-reported error message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode device response")]
    Decode(#[source] serde_json::Error),
}

impl ShellyError {
    /// Convert into the domain [`ControlError`] taxonomy for propagation
    /// across the port boundary.
    ///
    /// A bad base URL fails identically on every attempt, so it lands in
    /// the non-retryable protocol bucket, not transport.
    #[must_use]
    pub fn into_control(self) -> ControlError {
        match self {
            Self::Http(err) => ControlError::Transport(Box::new(err)),
            Self::Rpc { code, message } => ControlError::Protocol { code, message },
            Self::Decode(err) => ControlError::Parse(err),
            Self::InvalidBaseUrl(url) => ControlError::Protocol {
                code: 0,
                message: format!("invalid device base URL: {url}"),
            },
        }
    }
}

impl From<ShellyError> for ControlError {
    fn from(err: ShellyError) -> Self {
        err.into_control()
    }
}
