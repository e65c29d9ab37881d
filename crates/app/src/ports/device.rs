//! Device client port — status reads and command writes against the device.

use std::future::Future;
use std::sync::Arc;

use shuttersync_domain::actuator::ActuatorStatus;
use shuttersync_domain::channel::{ChannelId, CoverId};
use shuttersync_domain::cover::CoverSnapshot;
use shuttersync_domain::error::ControlError;

/// Issues single request/response exchanges against the device's status and
/// control API.
///
/// Every method is exactly one exchange: no implicit retries at this layer.
/// Failures surface as a typed [`ControlError`] and never panic past this
/// boundary — callers decide whether to retry or abort.
pub trait DeviceClient {
    /// Read both cover positions in one status query.
    fn cover_positions(&self)
    -> impl Future<Output = Result<CoverSnapshot, ControlError>> + Send;

    /// Read the current on/off state of one relay channel.
    fn actuator_status(
        &self,
        channel: ChannelId,
    ) -> impl Future<Output = Result<ActuatorStatus, ControlError>> + Send;

    /// Switch a relay channel on or off.
    fn set_actuator(
        &self,
        channel: ChannelId,
        on: bool,
    ) -> impl Future<Output = Result<(), ControlError>> + Send;

    /// Command a cover to drive to the given target position.
    fn command_cover(
        &self,
        cover: CoverId,
        target_pos: u8,
    ) -> impl Future<Output = Result<(), ControlError>> + Send;
}

impl<T: DeviceClient + Send + Sync> DeviceClient for Arc<T> {
    fn cover_positions(
        &self,
    ) -> impl Future<Output = Result<CoverSnapshot, ControlError>> + Send {
        (**self).cover_positions()
    }

    fn actuator_status(
        &self,
        channel: ChannelId,
    ) -> impl Future<Output = Result<ActuatorStatus, ControlError>> + Send {
        (**self).actuator_status(channel)
    }

    fn set_actuator(
        &self,
        channel: ChannelId,
        on: bool,
    ) -> impl Future<Output = Result<(), ControlError>> + Send {
        (**self).set_actuator(channel, on)
    }

    fn command_cover(
        &self,
        cover: CoverId,
        target_pos: u8,
    ) -> impl Future<Output = Result<(), ControlError>> + Send {
        (**self).command_cover(cover, target_pos)
    }
}
