//! Error taxonomy shared across the device IO and coordination boundaries.

use crate::channel::ChannelId;

/// Failures surfaced by device IO and the coordination flow.
///
/// Every IO boundary converts its library errors into one of these variants;
/// nothing panics past a port. A failure halts the current event's decision
/// chain only — the dispatcher itself keeps running.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The request could not be sent or the response never arrived.
    #[error("transport failure talking to the device")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The device answered with an error code, or the request could not be
    /// formed at all.
    #[error("device error {code}: {message}")]
    Protocol {
        /// Device-reported error code; `0` when the failure is local.
        code: i32,
        /// Device-reported error message.
        message: String,
    },

    /// The response body was absent or malformed.
    #[error("failed to parse device response")]
    Parse(#[source] serde_json::Error),

    /// A poll or join budget was exhausted before the covers closed.
    #[error("timed out after {waited_ms}ms waiting for the device")]
    Timeout {
        /// How long the operation waited before giving up.
        waited_ms: u64,
    },

    /// A decision sequence is already in flight on this channel.
    #[error("channel {0} already has a decision sequence in flight")]
    Busy(ChannelId),
}

impl ControlError {
    /// Whether retrying the same request can reasonably succeed.
    ///
    /// Transport failures are transient; protocol and parse failures would
    /// fail again identically, and a timeout already spent its budget.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
