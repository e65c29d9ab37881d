//! Button input events delivered by the device.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::ChannelId;

/// Kind of button action reported with an input event.
///
/// The variants mirror the wire names used by the device firmware
/// (`single_push`, `btn_down`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    #[serde(rename = "single_push")]
    SinglePush,
    #[serde(rename = "long_push")]
    LongPush,
    #[serde(rename = "double_push")]
    DoublePush,
    #[serde(rename = "triple_push")]
    TriplePush,
    #[serde(rename = "btn_down")]
    ButtonDown,
    #[serde(rename = "btn_up")]
    ButtonUp,
}

impl ButtonAction {
    /// Parse the wire name used by the device, `None` for anything unknown.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "single_push" => Some(Self::SinglePush),
            "long_push" => Some(Self::LongPush),
            "double_push" => Some(Self::DoublePush),
            "triple_push" => Some(Self::TriplePush),
            "btn_down" => Some(Self::ButtonDown),
            "btn_up" => Some(Self::ButtonUp),
            _ => None,
        }
    }

    /// Wire name used by the device.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::SinglePush => "single_push",
            Self::LongPush => "long_push",
            Self::DoublePush => "double_push",
            Self::TriplePush => "triple_push",
            Self::ButtonDown => "btn_down",
            Self::ButtonUp => "btn_up",
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A single physical button event.
///
/// Immutable, created per event delivery and consumed once by the
/// dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Input channel the button belongs to.
    pub channel: ChannelId,
    /// What the button did.
    pub action: ButtonAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_wire_name() {
        for action in [
            ButtonAction::SinglePush,
            ButtonAction::LongPush,
            ButtonAction::DoublePush,
            ButtonAction::TriplePush,
            ButtonAction::ButtonDown,
            ButtonAction::ButtonUp,
        ] {
            assert_eq!(ButtonAction::parse(action.as_wire()), Some(action));
        }
    }

    #[test]
    fn should_return_none_for_unknown_wire_name() {
        assert_eq!(ButtonAction::parse("quadruple_push"), None);
        assert_eq!(ButtonAction::parse(""), None);
    }

    #[test]
    fn should_serialize_to_wire_name() {
        let json = serde_json::to_string(&ButtonAction::ButtonDown).unwrap();
        assert_eq!(json, "\"btn_down\"");
    }

    #[test]
    fn should_roundtrip_input_event_through_serde_json() {
        let event = InputEvent {
            channel: ChannelId::ONE,
            action: ButtonAction::LongPush,
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
