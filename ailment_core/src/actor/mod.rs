//! Actors, their capability sets, and the arena that owns them

mod arena;
mod registry;

pub use arena::ActorArena;
pub use registry::StatusRegistry;

use crate::types::{ActorId, Archetype, Position};
use serde::{Deserialize, Serialize};

/// Capabilities an actor opts into at construction time.
///
/// The engine consults these instead of probing for components at runtime:
/// an actor without `movable` never has its speed touched, one without
/// `health` never takes damage, one without `status_sink` never gets
/// registry entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Takes damage and can die
    pub health: bool,
    /// Has a speed that slows and freezes can scale
    pub movable: bool,
    /// Tracks status kinds in a queryable registry
    pub status_sink: bool,
}

impl Capabilities {
    /// Everything: the usual set for players and enemies
    pub fn full() -> Self {
        Capabilities {
            health: true,
            movable: true,
            status_sink: true,
        }
    }

    /// Damageable but rooted in place (turrets, destructibles)
    pub fn stationary() -> Self {
        Capabilities {
            health: true,
            movable: false,
            status_sink: true,
        }
    }

    /// Untouchable scenery
    pub fn inert() -> Self {
        Capabilities {
            health: false,
            movable: false,
            status_sink: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::full()
    }
}

/// Transient resistance window (stealth and similar states).
///
/// While active, its multiplier composes multiplicatively with the
/// archetype table at request-resolution time. It never replaces the
/// archetype multiplier and is never consulted mid-effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Veil {
    /// Duration multiplier in (0, 1]
    pub multiplier: f64,
    /// Simulation timestamp at which the window closes
    pub expires_at: f64,
}

impl Veil {
    pub fn is_active(&self, now: f64) -> bool {
        now < self.expires_at
    }
}

/// A participant in the effect engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Assigned by [`ActorArena::spawn`]
    pub id: ActorId,
    pub name: String,
    pub archetype: Archetype,
    pub position: Position,
    pub max_health: f64,
    pub current_health: f64,
    /// Units per second at multiplier 1.0
    pub base_speed: f64,
    /// Current movement scale in [0, 1]; 1.0 means unimpaired
    pub speed_multiplier: f64,
    /// Lowered exactly once; never raised again
    pub alive: bool,
    pub caps: Capabilities,
    pub statuses: StatusRegistry,
    /// Active stealth window, if any
    pub veil: Option<Veil>,
}

impl Actor {
    /// Create an actor with full capabilities, 100 health and unit speed
    pub fn new(name: &str, archetype: Archetype) -> Self {
        Actor {
            id: ActorId(0),
            name: name.to_string(),
            archetype,
            position: Position::default(),
            max_health: 100.0,
            current_health: 100.0,
            base_speed: 1.0,
            speed_multiplier: 1.0,
            alive: true,
            caps: Capabilities::full(),
            statuses: StatusRegistry::new(),
            veil: None,
        }
    }

    /// Set max health (and fill current health to match)
    pub fn with_health(mut self, max_health: f64) -> Self {
        self.max_health = max_health;
        self.current_health = max_health;
        self
    }

    pub fn with_speed(mut self, base_speed: f64) -> Self {
        self.base_speed = base_speed;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Effective movement speed
    pub fn current_speed(&self) -> f64 {
        self.base_speed * self.speed_multiplier
    }

    /// Apply damage through the health capability.
    ///
    /// Clamps at zero and lowers the alive flag at the death threshold.
    /// Returns the damage actually applied (zero for actors without the
    /// health capability, dead actors, and non-positive amounts).
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        if !self.caps.health || !self.alive || amount <= 0.0 {
            return 0.0;
        }
        let applied = amount.min(self.current_health);
        self.current_health -= applied;
        if self.current_health <= 0.0 {
            self.current_health = 0.0;
            self.alive = false;
        }
        applied
    }

    /// Set the movement multiplier through the movable capability.
    ///
    /// Values are clamped into [0, 1]. Dead or immovable actors ignore the
    /// call.
    pub fn set_speed_multiplier(&mut self, value: f64) {
        if !self.caps.movable || !self.alive {
            return;
        }
        self.speed_multiplier = value.clamp(0.0, 1.0);
    }
}
