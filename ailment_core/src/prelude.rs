//! Prelude module for convenient imports
//!
//! ```rust
//! use ailment_core::prelude::*;
//! ```

// Core types
pub use crate::types::{ActorId, Archetype, EffectId, Position, StatusKind};

// Actors
pub use crate::actor::{Actor, ActorArena, Capabilities, StatusRegistry, Veil};

// Effects
pub use crate::effect::{
    ActiveEffect, Applied, ApplyError, ApplyRequest, BurnParams, EffectFamily, EffectParams,
    EffectState, FrostParams, FrostPhase, PoisonParams,
};

// Engine
pub use crate::engine::{
    DamageEvent, EffectEngine, EndReason, EndedEffect, PhaseShift, StackCoordinator, TickReport,
};

// Resistance
pub use crate::resist::ResistanceTable;

// Area resolution
pub use crate::area::AreaQuery;

// Config
pub use crate::config::{AbilityBook, ConfigError};
