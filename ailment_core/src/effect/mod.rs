//! Effect instances and their application parameters

mod burn;
mod frost;
mod poison;

pub use burn::{BurnState, SPLASH_FACTOR};
pub use frost::{FrostPhase, FrostState};
pub use poison::PoisonState;

use crate::types::{ActorId, EffectId, StatusKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boundary rejection for malformed application requests.
///
/// Nothing is constructed when a request is rejected; a zero or negative
/// magnitude is never silently applied as healing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError {
    #[error("effect damage must be positive, got {0}")]
    NonPositiveDamage(f64),
    #[error("effect duration must be positive, got {0}")]
    NonPositiveDuration(f64),
    #[error("tick interval must be positive, got {0}")]
    NonPositiveTickInterval(f64),
    #[error("splash radius must be positive, got {0}")]
    NonPositiveRadius(f64),
}

/// Poison application parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoisonParams {
    /// Total damage a single stack spreads over the full duration
    pub base_damage: f64,
    pub duration: f64,
    /// Seconds between damage ticks
    pub tick_rate: f64,
    /// Speed reduction per stack (0.1 = 10% slower per stack)
    #[serde(default = "default_poison_slow")]
    pub slow_amount: f64,
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
    /// Extra tick damage per stack beyond the first
    #[serde(default = "default_stack_damage_multiplier")]
    pub stack_damage_multiplier: f64,
}

fn default_poison_slow() -> f64 {
    0.1
}

fn default_max_stacks() -> u32 {
    3
}

fn default_stack_damage_multiplier() -> f64 {
    0.5
}

impl PoisonParams {
    pub fn validate(&self) -> Result<(), ApplyError> {
        if self.base_damage <= 0.0 {
            return Err(ApplyError::NonPositiveDamage(self.base_damage));
        }
        if self.duration <= 0.0 {
            return Err(ApplyError::NonPositiveDuration(self.duration));
        }
        if self.tick_rate <= 0.0 {
            return Err(ApplyError::NonPositiveTickInterval(self.tick_rate));
        }
        Ok(())
    }
}

/// Burn application parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnParams {
    /// One-time damage applied to the primary target on application
    pub burst_damage: f64,
    /// Total damage-over-time spread across the duration
    pub dot_damage: f64,
    pub duration: f64,
    /// Seconds between damage ticks
    pub tick_rate: f64,
    /// Splash radius for the application burst; absent means single target
    #[serde(default)]
    pub splash_radius: Option<f64>,
}

impl BurnParams {
    pub fn validate(&self) -> Result<(), ApplyError> {
        if self.burst_damage <= 0.0 {
            return Err(ApplyError::NonPositiveDamage(self.burst_damage));
        }
        if self.dot_damage <= 0.0 {
            return Err(ApplyError::NonPositiveDamage(self.dot_damage));
        }
        if self.duration <= 0.0 {
            return Err(ApplyError::NonPositiveDuration(self.duration));
        }
        if self.tick_rate <= 0.0 {
            return Err(ApplyError::NonPositiveTickInterval(self.tick_rate));
        }
        if let Some(radius) = self.splash_radius {
            if radius <= 0.0 {
                return Err(ApplyError::NonPositiveRadius(radius));
            }
        }
        Ok(())
    }

    pub fn has_splash(&self) -> bool {
        self.splash_radius.is_some()
    }
}

/// Frost application parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrostParams {
    /// One-time damage applied on application
    pub direct_damage: f64,
    /// Probability in [0, 1] that the target enters the Freezing phase
    pub freeze_chance: f64,
    pub freeze_duration: f64,
    pub chill_duration: f64,
    /// Speed reduction during the Chilling phase (0.3 = 30% slower)
    #[serde(default = "default_chill_slow")]
    pub chill_slow_amount: f64,
}

fn default_chill_slow() -> f64 {
    0.3
}

impl FrostParams {
    pub fn validate(&self) -> Result<(), ApplyError> {
        if self.direct_damage <= 0.0 {
            return Err(ApplyError::NonPositiveDamage(self.direct_damage));
        }
        if self.freeze_duration <= 0.0 {
            return Err(ApplyError::NonPositiveDuration(self.freeze_duration));
        }
        if self.chill_duration <= 0.0 {
            return Err(ApplyError::NonPositiveDuration(self.chill_duration));
        }
        Ok(())
    }

    /// Freeze chance clamped into [0, 1]
    pub fn clamped_freeze_chance(&self) -> f64 {
        self.freeze_chance.clamp(0.0, 1.0)
    }
}

/// What an ability or hazard asks the engine to apply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectParams {
    Poison(PoisonParams),
    Burn(BurnParams),
    Frost(FrostParams),
}

impl EffectParams {
    /// Reject zero/negative magnitudes, durations and tick intervals
    pub fn validate(&self) -> Result<(), ApplyError> {
        match self {
            EffectParams::Poison(p) => p.validate(),
            EffectParams::Burn(p) => p.validate(),
            EffectParams::Frost(p) => p.validate(),
        }
    }

    pub fn family(&self) -> EffectFamily {
        match self {
            EffectParams::Poison(_) => EffectFamily::Poison,
            EffectParams::Burn(_) => EffectFamily::Burn,
            EffectParams::Frost(_) => EffectFamily::Frost,
        }
    }
}

/// Elemental family, independent of a frost instance's current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectFamily {
    Poison,
    Burn,
    Frost,
}

/// Application request: target plus the elemental payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyRequest {
    pub target: ActorId,
    /// Originating actor, excluded from splash resolution
    #[serde(default)]
    pub source: Option<ActorId>,
    pub params: EffectParams,
}

impl ApplyRequest {
    pub fn new(target: ActorId, params: EffectParams) -> Self {
        ApplyRequest {
            target,
            source: None,
            params,
        }
    }

    pub fn with_source(mut self, source: ActorId) -> Self {
        self.source = Some(source);
        self
    }
}

/// Outcome of a resolved application request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A new instance was created
    Created(EffectId),
    /// A poison re-application merged into the live instance
    Stacked { effect: EffectId, stacks: u32 },
    /// Target already destroyed; nothing was created
    StaleTarget,
}

/// A live, ticking effect instance bound to one target.
///
/// Instances advance by explicit state and elapsed-time fields; there is no
/// suspension primitive. The `finished` flag makes teardown exactly-once.
#[derive(Debug, Clone)]
pub struct ActiveEffect {
    pub id: EffectId,
    pub target: ActorId,
    /// Time since application (frost: time since the current phase began)
    pub elapsed: f64,
    /// Countdown to the next damage tick
    pub time_until_tick: f64,
    /// Raised by teardown; a finished instance is inert until swept
    pub finished: bool,
    pub state: EffectState,
}

/// Kind-specific live state
#[derive(Debug, Clone)]
pub enum EffectState {
    Poison(PoisonState),
    Burn(BurnState),
    Frost(FrostState),
}

impl ActiveEffect {
    pub fn family(&self) -> EffectFamily {
        match self.state {
            EffectState::Poison(_) => EffectFamily::Poison,
            EffectState::Burn(_) => EffectFamily::Burn,
            EffectState::Frost(_) => EffectFamily::Frost,
        }
    }

    /// Registry kind this instance currently owns
    pub fn kind(&self) -> StatusKind {
        match &self.state {
            EffectState::Poison(_) => StatusKind::Poisoned,
            EffectState::Burn(_) => StatusKind::Burning,
            EffectState::Frost(state) => state.kind(),
        }
    }
}
