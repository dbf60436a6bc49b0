//! Archetype resistance - duration multipliers applied at request time
//!
//! Resistance scales the duration of incoming status effects, not their
//! damage. A fire-affiliated archetype listing 0.5 for Burning has its own
//! burn durations halved (self-resistance, not resistance granted to
//! others). The lookup happens exactly once, when a request is resolved,
//! never mid-effect.

use crate::types::{Archetype, StatusKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Upper bound for a duration multiplier (1.0 = no resistance)
pub const MAX_MULTIPLIER: f64 = 1.0;

/// Per-archetype duration multipliers in (0, 1].
///
/// Unlisted (archetype, kind) pairs default to 1.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResistanceTable {
    overrides: HashMap<Archetype, HashMap<StatusKind, f64>>,
}

impl ResistanceTable {
    /// Create a table with no overrides (everything 1.0)
    pub fn new() -> Self {
        ResistanceTable {
            overrides: HashMap::new(),
        }
    }

    /// Register a multiplier for an archetype/kind pair.
    ///
    /// Values above 1.0 are clamped down; zero or negative values would
    /// erase the effect entirely and are dropped with a warning.
    pub fn set(&mut self, archetype: Archetype, kind: StatusKind, multiplier: f64) {
        if multiplier <= 0.0 {
            warn!(
                ?archetype,
                ?kind,
                multiplier,
                "ignoring non-positive resistance multiplier"
            );
            return;
        }
        self.overrides
            .entry(archetype)
            .or_default()
            .insert(kind, multiplier.min(MAX_MULTIPLIER));
    }

    /// Duration multiplier for an archetype/kind pair (1.0 when unlisted)
    pub fn multiplier(&self, archetype: Archetype, kind: StatusKind) -> f64 {
        self.overrides
            .get(&archetype)
            .and_then(|kinds| kinds.get(&kind))
            .copied()
            .unwrap_or(MAX_MULTIPLIER)
    }

    /// Built-in kingdom resistances
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.set(Archetype::Cinderkin, StatusKind::Burning, 0.5);
        table.set(Archetype::Rimeborn, StatusKind::Frozen, 0.5);
        table.set(Archetype::Rimeborn, StatusKind::Chilled, 0.5);
        table.set(Archetype::Mirefolk, StatusKind::Poisoned, 0.6);
        table
    }

    /// Number of registered overrides across all archetypes
    pub fn len(&self) -> usize {
        self.overrides.values().map(|kinds| kinds.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
