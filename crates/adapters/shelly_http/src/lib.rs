//! # shuttersync-adapter-shelly-http
//!
//! Shelly HTTP adapter — implements the [`DeviceClient`] port against the
//! device's HTTP/RPC API.
//!
//! ## Responsibilities
//! - Read cover positions from `Shelly.GetStatus`
//! - Drive covers via the `roller` endpoint (`go=to_pos`)
//! - Read and write relay state via the `Switch.GetStatus` / `Switch.Set`
//!   RPC methods
//! - Map transport, device, and decode failures into the domain taxonomy
//!
//! ## Dependency rule
//! Depends on `shuttersync-app` (for the port) and `shuttersync-domain`.
//!
//! [`DeviceClient`]: shuttersync_app::ports::DeviceClient

pub mod client;
pub mod config;
pub mod error;
pub mod status;

pub use client::ShellyHttpClient;
pub use config::ShellyConfig;
pub use error::ShellyError;
