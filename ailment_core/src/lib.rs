//! ailment_core - Elemental status effect engine for game actors
//!
//! This library provides:
//! - ActorArena: owned, id-keyed actor storage with capability gating
//! - EffectEngine: applies, ticks, merges and tears down elemental conditions
//! - StatusRegistry: per-actor status bookkeeping
//! - ResistanceTable: archetype duration multipliers

pub mod actor;
pub mod area;
pub mod config;
pub mod effect;
pub mod engine;
pub mod prelude;
pub mod resist;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, ActorArena, Capabilities, StatusRegistry, Veil};
pub use area::AreaQuery;
pub use config::{AbilityBook, ConfigError};
pub use effect::{
    ActiveEffect, Applied, ApplyError, ApplyRequest, BurnParams, EffectFamily, EffectParams,
    FrostParams, FrostPhase, PoisonParams,
};
pub use engine::{EffectEngine, EndReason, StackCoordinator, TickReport};
pub use resist::ResistanceTable;
pub use types::{ActorId, Archetype, EffectId, Position, StatusKind};
