//! # shuttersync-adapter-webhook-axum
//!
//! Webhook adapter — the device is configured to POST its input-event
//! notifications to this listener, which translates them into domain
//! [`InputEvent`]s and publishes them onto the event bus.
//!
//! Only `name == "input"` notifications for the two known channels with a
//! recognized action produce an event; everything else is acknowledged and
//! dropped, never an error.
//!
//! [`InputEvent`]: shuttersync_domain::input::InputEvent

pub mod payload;
pub mod router;
pub mod state;

pub use state::AppState;
