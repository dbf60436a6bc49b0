//! Core identifiers and enumerations shared across the engine

use serde::{Deserialize, Serialize};

/// Stable identifier for an actor in the arena
///
/// Ids are never reused; a destroyed actor's id keeps resolving to "not
/// alive" rather than dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Identifier for a live effect instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u64);

/// Status conditions an actor can carry
///
/// Frozen and Chilled are never owned by the same instance at the same time
/// (a frost instance holds one or the other), but Chilled can coexist with
/// Burning, Poisoned, etc. on one actor. Stunned and Rooted are registry-only
/// timed flags with no ticking instance behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Poisoned,
    Burning,
    Frozen,
    Chilled,
    Stunned,
    Rooted,
}

impl StatusKind {
    /// Get all status kinds
    pub fn all() -> &'static [StatusKind] {
        &[
            StatusKind::Poisoned,
            StatusKind::Burning,
            StatusKind::Frozen,
            StatusKind::Chilled,
            StatusKind::Stunned,
            StatusKind::Rooted,
        ]
    }
}

/// Elemental kingdom affiliation, the source of resistance multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// No affiliation, no built-in resistances
    Neutral,
    /// Fire kingdom
    Cinderkin,
    /// Venom kingdom
    Mirefolk,
    /// Frost kingdom
    Rimeborn,
}

/// 2D world position, used only for the one-shot area query
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
