//! Actuator (relay) state snapshot.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelId;

/// On/off state of one relay channel.
///
/// Read fresh from the device for every decision — never cached, so the
/// dispatcher cannot act on stale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorStatus {
    /// Channel the relay belongs to.
    pub channel: ChannelId,
    /// Whether the relay output is currently on.
    pub is_on: bool,
}
