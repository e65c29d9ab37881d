//! # shuttersync-domain
//!
//! Pure domain model for the shuttersync cover/relay controller.
//!
//! ## Responsibilities
//! - Foundational types: the two-slot channel and cover identifiers, the
//!   error taxonomy shared across IO boundaries
//! - Define **button actions** and the input events carrying them
//! - Define **actuator** (relay) and **cover** (roller) state snapshots
//! - Define the **closure thresholds** and the logic deciding which covers
//!   still need closing
//! - Define the **dispatch policy** — the decision table mapping a button
//!   action and the current actuator state to an outcome
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod actuator;
pub mod channel;
pub mod cover;
pub mod input;
pub mod policy;
