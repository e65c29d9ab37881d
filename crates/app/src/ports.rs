//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the coordination core and the outside
//! world. They are defined here (in `app`) so that both the coordination
//! layer and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod device;
pub mod event_bus;

pub use device::DeviceClient;
pub use event_bus::InputPublisher;
