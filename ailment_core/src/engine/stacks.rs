//! StackCoordinator - one live poison instance per target

use crate::types::{ActorId, EffectId};
use std::collections::HashMap;

/// Routes poison re-applications into stack merges.
///
/// The table is owned by the engine (not a global), keyed by stable actor
/// id. Invariant: at most one entry per target, inserted when the instance
/// is created and released on the same teardown path that restores the
/// actor - natural expiry, target destruction and cleansing included.
#[derive(Debug, Clone, Default)]
pub struct StackCoordinator {
    table: HashMap<ActorId, EffectId>,
}

impl StackCoordinator {
    pub fn new() -> Self {
        StackCoordinator {
            table: HashMap::new(),
        }
    }

    /// Record the live instance for a target
    pub fn register(&mut self, target: ActorId, effect: EffectId) {
        self.table.insert(target, effect);
    }

    /// The live instance for a target, if any
    pub fn lookup(&self, target: ActorId) -> Option<EffectId> {
        self.table.get(&target).copied()
    }

    /// Drop the entry for a target, returning the instance it pointed at
    pub fn release(&mut self, target: ActorId) -> Option<EffectId> {
        self.table.remove(&target)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
