//! Input dispatcher — turns button events into actuator and cover actions.
//!
//! For each event the dispatcher reads the *fresh* actuator state, applies
//! the decision table of the active policy, and either switches the relay
//! directly or runs the close-then-switch flow through the coordinator.
//! Reads and the subsequent decision are strictly sequential within one
//! event; across events each channel is protected by an in-flight slot so
//! two overlapping triggers cannot interleave their network calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

use shuttersync_domain::error::ControlError;
use shuttersync_domain::input::InputEvent;
use shuttersync_domain::policy::Decision;

use crate::actuator::ActuatorController;
use crate::coordinator::ClosureCoordinator;
use crate::ports::DeviceClient;
use crate::settings::ControlSettings;

/// What the dispatcher did with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action is not a trigger under the active policy.
    Ignored,
    /// The actuator was on and has been switched off.
    TurnedOff,
    /// The actuator was switched on without touching the covers.
    TurnedOn,
    /// Open covers were closed first, then the actuator was switched on.
    ClosedThenTurnedOn,
}

/// Dispatches button events against the device.
pub struct InputDispatcher<C> {
    actuators: ActuatorController<C>,
    coordinator: ClosureCoordinator<C>,
    client: C,
    settings: ControlSettings,
    in_flight: [AtomicBool; 2],
}

impl<C: DeviceClient + Clone> InputDispatcher<C> {
    /// Create a dispatcher driving the device through `client`.
    pub fn new(client: C, settings: ControlSettings) -> Self {
        Self {
            actuators: ActuatorController::new(client.clone()),
            coordinator: ClosureCoordinator::new(client.clone(), &settings),
            client,
            settings,
            in_flight: [AtomicBool::new(false), AtomicBool::new(false)],
        }
    }

    /// Handle one event end to end: read fresh actuator state, decide, act.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Busy`] when a decision sequence is already in
    /// flight on the channel, or the first device error that halts the
    /// decision chain.
    #[tracing::instrument(skip_all, fields(channel = %event.channel, action = %event.action))]
    pub async fn handle_event(&self, event: InputEvent) -> Result<Outcome, ControlError> {
        // Non-triggers never contend for the channel slot.
        if !self.settings.policy.is_trigger(event.action) {
            return Ok(Outcome::Ignored);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight[event.channel.index()]) else {
            tracing::warn!("trigger rejected, decision sequence already in flight");
            return Err(ControlError::Busy(event.channel));
        };

        let status = self.actuators.status(event.channel).await?;
        match self.settings.policy.decide(event.action, status.is_on) {
            Decision::Ignore => Ok(Outcome::Ignored),
            Decision::TurnOff => {
                tracing::info!("switching actuator off");
                self.actuators.set(event.channel, false).await;
                Ok(Outcome::TurnedOff)
            }
            Decision::TurnOnImmediately => {
                tracing::info!("switching actuator on");
                self.actuators.set(event.channel, true).await;
                Ok(Outcome::TurnedOn)
            }
            Decision::CloseThenTurnOn => {
                let snapshot = self.client.cover_positions().await?;
                let to_close = self.settings.thresholds.covers_needing_close(&snapshot);
                tracing::info!(open_covers = to_close.len(), "closing covers before switch-on");
                self.coordinator
                    .close_and_await(&to_close, &self.settings.thresholds)
                    .await?;
                self.actuators.set(event.channel, true).await;
                Ok(Outcome::ClosedThenTurnedOn)
            }
        }
    }
}

impl<C: DeviceClient + Clone + Send + Sync + 'static> InputDispatcher<C> {
    /// Run the dispatch loop until the bus closes.
    ///
    /// Each received event is handled on its own task so a long
    /// close-and-poll sequence on one channel never blocks the other
    /// channel.
    pub async fn run(self: Arc<Self>, mut events: broadcast::Receiver<InputEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let dispatcher = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(err) = dispatcher.handle_event(event).await {
                            tracing::warn!(
                                error = %err,
                                channel = %event.channel,
                                "event handling aborted"
                            );
                        }
                    });
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "input events dropped, receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

/// RAII occupancy marker for one channel's in-flight slot.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(slot: &'a AtomicBool) -> Option<Self> {
        slot.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then_some(Self(slot))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
