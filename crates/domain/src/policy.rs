//! Dispatch policy — the decision table tying button actions to actuator
//! and cover behavior.
//!
//! Two controller variants exist in the field and they are not semantically
//! identical, so the choice is an explicit configuration enum rather than a
//! silent merge.

use serde::{Deserialize, Serialize};

use crate::input::ButtonAction;

/// Which controller variant drives the dispatch decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// A single push closes open covers before switching the actuator on;
    /// a long push switches it on immediately with no cover interaction.
    #[default]
    ShortPressCloses,
    /// Only the button-down edge triggers the close-then-switch flow; there
    /// is no immediate-on branch.
    ButtonDownCloses,
}

/// Outcome of the decision table for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Actuator is on — switch it off, no cover interaction.
    TurnOff,
    /// Switch the actuator on without touching the covers.
    TurnOnImmediately,
    /// Close any open covers first, then switch the actuator on.
    CloseThenTurnOn,
    /// Not a trigger under the active policy.
    Ignore,
}

impl DispatchPolicy {
    /// Whether the action is a trigger at all under this policy.
    ///
    /// Classification needs no device state, so callers can ignore
    /// non-triggers before doing any IO.
    #[must_use]
    pub fn is_trigger(self, action: ButtonAction) -> bool {
        match self {
            Self::ShortPressCloses => {
                matches!(action, ButtonAction::SinglePush | ButtonAction::LongPush)
            }
            Self::ButtonDownCloses => matches!(action, ButtonAction::ButtonDown),
        }
    }

    /// Apply the decision table to one action and the fresh actuator state.
    ///
    /// An already-on actuator is always switched off by a triggering action,
    /// regardless of cover positions — both field variants agree on that
    /// branch.
    #[must_use]
    pub fn decide(self, action: ButtonAction, actuator_on: bool) -> Decision {
        if !self.is_trigger(action) {
            return Decision::Ignore;
        }
        if actuator_on {
            return Decision::TurnOff;
        }
        match (self, action) {
            (Self::ShortPressCloses, ButtonAction::LongPush) => Decision::TurnOnImmediately,
            _ => Decision::CloseThenTurnOn,
        }
    }
}
