//! Control settings injected into the coordination components.
//!
//! Everything here used to live as compiled-in constants on the device;
//! modeling it as an injected value object is what makes the components
//! testable with doubles.

use std::time::Duration;

use shuttersync_domain::cover::ClosureThresholds;
use shuttersync_domain::policy::DispatchPolicy;

/// Tunables for the close-then-switch flow.
#[derive(Debug, Clone)]
pub struct ControlSettings {
    /// Position commanded when closing a cover.
    pub close_position: u8,
    /// Per-cover closed thresholds.
    pub thresholds: ClosureThresholds,
    /// Delay between position polls.
    pub poll_interval: Duration,
    /// Poll budget before giving up with a timeout.
    pub max_poll_attempts: u32,
    /// Deadline for the close-command fan-in.
    pub command_timeout: Duration,
    /// Active dispatch policy.
    pub policy: DispatchPolicy,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            close_position: 6,
            thresholds: ClosureThresholds::new([15, 20]),
            poll_interval: Duration::from_millis(1000),
            max_poll_attempts: 120,
            command_timeout: Duration::from_secs(10),
            policy: DispatchPolicy::default(),
        }
    }
}
