//! Feedback events for the floating-number display
//!
//! Pure observation: the engine's invariants never depend on these being
//! consumed. Each event carries the tile where the number should appear.

use serde::{Deserialize, Serialize};

use crate::grid::coord::TileCoord;

/// A resource or damage number to surface at a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackEvent {
    /// Movement points spent; tile is the move's destination
    MovementPointsSpent { amount: u32, tile: TileCoord },
    /// Action points spent; tile is the caster's position
    ActionPointsSpent { amount: u32, tile: TileCoord },
    /// Damage applied to the unit on `tile`
    DamageDealt { amount: u32, tile: TileCoord },
}
