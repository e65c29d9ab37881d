//! Two-slot identifier newtypes for the device's inputs and covers.
//!
//! The target hardware exposes exactly two relay channels and two covers,
//! so the identifiers are validated at construction and anything outside
//! slot 0 and slot 1 is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw identifier was outside the two device slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier {0} is outside the two device slots")]
pub struct InvalidSlot(pub u8);

macro_rules! define_slot_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub struct $name(u8);

        impl $name {
            /// First slot.
            pub const ZERO: Self = Self(0);
            /// Second slot.
            pub const ONE: Self = Self(1);

            /// Wrap a raw device identifier, rejecting anything outside the
            /// two known slots.
            #[must_use]
            pub fn new(raw: u8) -> Option<Self> {
                (raw <= 1).then_some(Self(raw))
            }

            /// Both slots in order.
            #[must_use]
            pub fn all() -> [Self; 2] {
                [Self::ZERO, Self::ONE]
            }

            /// Raw identifier as reported by the device.
            #[must_use]
            pub fn as_u8(self) -> u8 {
                self.0
            }

            /// Index into per-slot tables.
            #[must_use]
            pub fn index(self) -> usize {
                usize::from(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<u8> for $name {
            type Error = InvalidSlot;

            fn try_from(raw: u8) -> Result<Self, Self::Error> {
                Self::new(raw).ok_or(InvalidSlot(raw))
            }
        }

        impl From<$name> for u8 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_slot_id!(
    /// Identifier of a button input / relay channel (slot 0 or 1).
    ChannelId
);

define_slot_id!(
    /// Identifier of a motorized cover (slot 0 or 1).
    CoverId
);
