//! Shared router state.

use std::sync::Arc;

use shuttersync_app::ports::InputPublisher;

/// State injected into the webhook handlers: the publisher side of the bus.
pub struct AppState<P> {
    /// Publisher the handlers push translated events into.
    pub publisher: Arc<P>,
}

impl<P: InputPublisher> AppState<P> {
    /// Wrap a publisher for sharing across handlers.
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }
}

// Derived Clone would require P: Clone; the Arc makes that unnecessary.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            publisher: Arc::clone(&self.publisher),
        }
    }
}
