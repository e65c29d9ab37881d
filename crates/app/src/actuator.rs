//! Actuator controller — relay reads and fire-and-forget writes.

use shuttersync_domain::actuator::ActuatorStatus;
use shuttersync_domain::channel::ChannelId;
use shuttersync_domain::error::ControlError;

use crate::ports::DeviceClient;

/// Reads and writes the relay state of one device through the client port.
pub struct ActuatorController<C> {
    client: C,
}

impl<C: DeviceClient> ActuatorController<C> {
    /// Create a controller talking through `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fresh relay state for a channel.
    ///
    /// # Errors
    ///
    /// Returns the device read error unchanged.
    pub async fn status(&self, channel: ChannelId) -> Result<ActuatorStatus, ControlError> {
        self.client.actuator_status(channel).await
    }

    /// Switch a relay on or off.
    ///
    /// Fire-and-forget from the caller's perspective: a write failure is
    /// logged and swallowed, not retried. The hardware stays in whatever
    /// state it was in.
    pub async fn set(&self, channel: ChannelId, on: bool) {
        if let Err(err) = self.client.set_actuator(channel, on).await {
            tracing::warn!(error = %err, %channel, on, "failed to switch actuator");
        }
    }
}
