//! # shuttersync-app
//!
//! Application layer — coordination logic and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceClient` — status reads and command writes against the device
//!   - `InputPublisher` — publish button events onto the bus
//! - Provide the coordination components:
//!   - `PositionPoller` — wait for the covers to reach their closed thresholds
//!   - `ClosureCoordinator` — fan out close commands, join, then poll
//!   - `ActuatorController` — relay reads and fire-and-forget writes
//!   - `InputDispatcher` — per-event decision flow with per-channel guards
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `shuttersync-domain` only (plus `tokio::sync`/`time` and
//! `futures` for the fan-in join). Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod actuator;
pub mod coordinator;
pub mod dispatcher;
pub mod event_bus;
pub mod poller;
pub mod ports;
pub mod settings;
