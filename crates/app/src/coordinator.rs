//! Closure coordinator — fans out close commands, joins on the
//! acknowledgments, then polls for completion.

use std::time::Duration;

use futures::future::try_join_all;

use shuttersync_domain::channel::CoverId;
use shuttersync_domain::cover::ClosureThresholds;
use shuttersync_domain::error::ControlError;

use crate::poller::PositionPoller;
use crate::ports::DeviceClient;
use crate::settings::ControlSettings;

/// Drives a set of covers to the close position and waits until the device
/// reports all of them closed.
pub struct ClosureCoordinator<C> {
    client: C,
    poller: PositionPoller<C>,
    close_position: u8,
    command_timeout: Duration,
}

impl<C: DeviceClient + Clone> ClosureCoordinator<C> {
    /// Create a coordinator issuing commands through `client`.
    pub fn new(client: C, settings: &ControlSettings) -> Self {
        let poller = PositionPoller::new(
            client.clone(),
            settings.poll_interval,
            settings.max_poll_attempts,
        );
        Self {
            client,
            poller,
            close_position: settings.close_position,
            command_timeout: settings.command_timeout,
        }
    }

    /// Close the given covers and wait for the device to report them closed.
    ///
    /// The fan-in join is count-based: the polling phase starts only once
    /// every individual close command has been acknowledged, regardless of
    /// per-request latency. An empty cover set short-circuits — no commands
    /// are issued and no polling happens.
    ///
    /// # Errors
    ///
    /// Returns the first command failure, [`ControlError::Timeout`] when the
    /// join deadline expires or the poll budget runs out, or a poll read
    /// error.
    pub async fn close_and_await(
        &self,
        covers: &[CoverId],
        thresholds: &ClosureThresholds,
    ) -> Result<(), ControlError> {
        if covers.is_empty() {
            tracing::debug!("all covers already closed, nothing to command");
            return Ok(());
        }

        let commands = covers
            .iter()
            .map(|cover| self.client.command_cover(*cover, self.close_position));
        match tokio::time::timeout(self.command_timeout, try_join_all(commands)).await {
            Ok(acks) => {
                acks?;
            }
            Err(_) => {
                return Err(ControlError::Timeout {
                    waited_ms: u64::try_from(self.command_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                });
            }
        }

        tracing::info!(
            covers = covers.len(),
            target = self.close_position,
            "close commands acknowledged, polling for completion"
        );
        self.poller.wait_until_closed(thresholds).await
    }
}
