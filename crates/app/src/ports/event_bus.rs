//! Event bus port — publishing button events to the dispatcher.

use std::future::Future;
use std::sync::Arc;

use shuttersync_domain::error::ControlError;
use shuttersync_domain::input::InputEvent;

/// Publishes button input events to interested subscribers.
pub trait InputPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: InputEvent) -> impl Future<Output = Result<(), ControlError>> + Send;
}

impl<T: InputPublisher + Send + Sync> InputPublisher for Arc<T> {
    fn publish(&self, event: InputEvent) -> impl Future<Output = Result<(), ControlError>> + Send {
        (**self).publish(event)
    }
}
