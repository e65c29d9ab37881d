//! Cover positions and the closed-threshold logic.

use serde::{Deserialize, Serialize};

use crate::channel::CoverId;

/// Device-reported position of one cover on its 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverPosition {
    /// Which cover the position belongs to.
    pub cover: CoverId,
    /// Current position (0 = fully closed, 100 = fully open).
    pub current_pos: u8,
}

/// Positions of both covers as read in a single status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverSnapshot([CoverPosition; 2]);

impl CoverSnapshot {
    /// Build a snapshot from the two raw positions in slot order.
    #[must_use]
    pub fn new(first: u8, second: u8) -> Self {
        Self([
            CoverPosition {
                cover: CoverId::ZERO,
                current_pos: first,
            },
            CoverPosition {
                cover: CoverId::ONE,
                current_pos: second,
            },
        ])
    }

    /// Both positions in slot order.
    #[must_use]
    pub fn positions(&self) -> &[CoverPosition; 2] {
        &self.0
    }

    /// Position of one cover.
    #[must_use]
    pub fn position_of(&self, cover: CoverId) -> CoverPosition {
        self.0[cover.index()]
    }
}

/// Per-cover position at or below which a cover counts as closed.
///
/// The thresholds are independent per cover and not assumed symmetric —
/// mechanically different rollers settle at different positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureThresholds([u8; 2]);

impl ClosureThresholds {
    /// Wrap the per-cover thresholds in slot order.
    #[must_use]
    pub fn new(thresholds: [u8; 2]) -> Self {
        Self(thresholds)
    }

    /// Threshold for one cover.
    #[must_use]
    pub fn for_cover(&self, cover: CoverId) -> u8 {
        self.0[cover.index()]
    }

    /// Whether a single position counts as closed.
    #[must_use]
    pub fn is_closed(&self, position: CoverPosition) -> bool {
        position.current_pos <= self.for_cover(position.cover)
    }

    /// Whether every cover in the snapshot sits at or below its threshold.
    #[must_use]
    pub fn all_closed(&self, snapshot: &CoverSnapshot) -> bool {
        snapshot.positions().iter().all(|pos| self.is_closed(*pos))
    }

    /// Covers currently above their threshold, i.e. those that still need a
    /// close command. Covers already at or below threshold are never
    /// re-commanded.
    #[must_use]
    pub fn covers_needing_close(&self, snapshot: &CoverSnapshot) -> Vec<CoverId> {
        snapshot
            .positions()
            .iter()
            .filter(|pos| !self.is_closed(**pos))
            .map(|pos| pos.cover)
            .collect()
    }
}
