//! # shuttersyncd — shuttersync daemon
//!
//! Composition root that wires the adapters together and runs the daemon.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env var overrides)
//! - Initialize tracing
//! - Construct the Shelly HTTP client (adapter)
//! - Construct the event bus and the input dispatcher, injecting the client
//!   via the port trait
//! - Build the webhook router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no decision logic belongs here.

use std::sync::Arc;

use shuttersync_adapter_shelly_http::ShellyHttpClient;
use shuttersync_adapter_webhook_axum::AppState;
use shuttersync_app::dispatcher::InputDispatcher;
use shuttersync_app::event_bus::InProcessEventBus;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Device client
    let client = Arc::new(ShellyHttpClient::new(&config.device)?);

    // Event bus and dispatcher
    let event_bus = Arc::new(InProcessEventBus::new(64));
    let dispatcher = Arc::new(InputDispatcher::new(
        Arc::clone(&client),
        config.control_settings(),
    ));
    tokio::spawn(Arc::clone(&dispatcher).run(event_bus.subscribe()));

    // Webhook listener
    let state = AppState::new(Arc::clone(&event_bus));
    let app = shuttersync_adapter_webhook_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, device = %config.device.base_url, "shuttersyncd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
