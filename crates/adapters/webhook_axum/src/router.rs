//! Axum router for the device notification webhook.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use shuttersync_app::ports::InputPublisher;

use crate::payload::EventNotification;
use crate::state::AppState;

/// Build the webhook [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<P>(state: AppState<P>) -> Router
where
    P: InputPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/notify", post(receive_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Accept one notification frame from the device.
///
/// Frames that translate into a button event are published and answered
/// with `202 Accepted`; everything else is acknowledged with
/// `204 No Content` so the device never sees an error for chatter we
/// deliberately ignore.
async fn receive_notification<P>(
    State(state): State<AppState<P>>,
    Json(notification): Json<EventNotification>,
) -> StatusCode
where
    P: InputPublisher + Send + Sync + 'static,
{
    match notification.to_input_event() {
        Some(event) => {
            tracing::debug!(channel = %event.channel, action = %event.action, "input event received");
            if let Err(err) = state.publisher.publish(event).await {
                tracing::error!(error = %err, "failed to publish input event");
                return StatusCode::INTERNAL_SERVER_ERROR;
            }
            StatusCode::ACCEPTED
        }
        None => {
            tracing::trace!(
                component = %notification.name,
                id = notification.id,
                "notification ignored"
            );
            StatusCode::NO_CONTENT
        }
    }
}
