//! Burn - application burst plus periodic fire damage
//!
//! Burn never touches movement; teardown is a no-op beyond clearing the
//! splash list.

use crate::effect::BurnParams;
use crate::types::ActorId;

/// Damage fraction splash secondaries receive, for both the application
/// burst and every tick
pub const SPLASH_FACTOR: f64 = 0.5;

/// Live burn state.
///
/// The splash list is resolved exactly once at application; members that die
/// afterwards are skipped on each tick, never re-queried.
#[derive(Debug, Clone)]
pub struct BurnState {
    /// Parameters with the duration already resistance-scaled
    pub params: BurnParams,
    /// Splash-affected targets (primary excluded)
    pub secondaries: Vec<ActorId>,
}

impl BurnState {
    pub fn new(params: BurnParams, secondaries: Vec<ActorId>) -> Self {
        BurnState {
            params,
            secondaries,
        }
    }

    /// Damage the primary target takes per tick
    pub fn primary_tick_damage(&self) -> f64 {
        self.params.dot_damage * (self.params.tick_rate / self.params.duration)
    }

    /// Damage each surviving splash target takes per tick
    pub fn secondary_tick_damage(&self) -> f64 {
        self.primary_tick_damage() * SPLASH_FACTOR
    }
}
