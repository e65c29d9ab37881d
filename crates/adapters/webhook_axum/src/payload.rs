//! Device notification payload.

use serde::Deserialize;

use shuttersync_domain::channel::ChannelId;
use shuttersync_domain::input::{ButtonAction, InputEvent};

/// One notification frame as delivered by the device's outbound webhook.
///
/// Frames from other components carry differently-shaped detail objects or
/// none at all, so everything past the component name is optional — such
/// chatter must still deserialize so it can be acknowledged.
#[derive(Debug, Deserialize)]
pub struct EventNotification {
    /// Component name; `"input"` for button events.
    pub name: String,
    /// Component instance id.
    pub id: u8,
    /// Event details, absent on frames that carry none.
    #[serde(default)]
    pub info: Option<EventInfo>,
}

/// Detail object nested inside a notification.
#[derive(Debug, Deserialize)]
pub struct EventInfo {
    /// Wire name of the action, e.g. `"single_push"`.
    #[serde(default)]
    pub event: Option<String>,
}

impl EventNotification {
    /// Interpret the notification as a button event.
    ///
    /// Returns `None` for non-input components, channels outside the two
    /// known slots, frames without event details, and unrecognized actions.
    #[must_use]
    pub fn to_input_event(&self) -> Option<InputEvent> {
        if self.name != "input" {
            return None;
        }
        let channel = ChannelId::new(self.id)?;
        let action = ButtonAction::parse(self.info.as_ref()?.event.as_deref()?)?;
        Some(InputEvent { channel, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(name: &str, id: u8, event: &str) -> EventNotification {
        EventNotification {
            name: name.to_string(),
            id,
            info: Some(EventInfo {
                event: Some(event.to_string()),
            }),
        }
    }

    #[test]
    fn should_translate_an_input_notification() {
        let event = notification("input", 1, "single_push").to_input_event().unwrap();
        assert_eq!(event.channel, ChannelId::ONE);
        assert_eq!(event.action, ButtonAction::SinglePush);
    }

    #[test]
    fn should_drop_non_input_components() {
        assert!(notification("switch", 0, "single_push").to_input_event().is_none());
    }

    #[test]
    fn should_drop_unknown_channels() {
        assert!(notification("input", 2, "single_push").to_input_event().is_none());
    }

    #[test]
    fn should_drop_unrecognized_actions() {
        assert!(notification("input", 0, "hold").to_input_event().is_none());
    }

    #[test]
    fn should_deserialize_a_frame_without_an_event_field() {
        let raw = r#"{"name": "cover", "id": 0, "info": {"state": "open"}}"#;
        let notification: EventNotification = serde_json::from_str(raw).unwrap();
        assert!(notification.to_input_event().is_none());
    }

    #[test]
    fn should_deserialize_a_frame_without_info() {
        let raw = r#"{"name": "sys", "id": 0}"#;
        let notification: EventNotification = serde_json::from_str(raw).unwrap();
        assert!(notification.to_input_event().is_none());
    }

    #[test]
    fn should_deserialize_the_wire_shape() {
        let raw = r#"{"name": "input", "id": 0, "info": {"event": "btn_down", "ts": 1700000000}}"#;
        let notification: EventNotification = serde_json::from_str(raw).unwrap();
        let event = notification.to_input_event().unwrap();
        assert_eq!(event.action, ButtonAction::ButtonDown);
    }
}
