//! StatusRegistry - per-actor status bookkeeping

use crate::types::StatusKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Query-only map of status kind to expiry timestamp.
///
/// Presence answers "does this actor currently count as X". The registry
/// performs no timing of its own: the effect instance that wrote an entry
/// removes it on teardown, and the engine prunes anything older than the
/// clock once per update pass. A reader can therefore observe a stale `true`
/// between an instance dying and the next housekeeping pass. Behavioral
/// state (speed, damage) is owned by the instance, never by this map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRegistry {
    entries: HashMap<StatusKind, f64>,
}

impl StatusRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        StatusRegistry {
            entries: HashMap::new(),
        }
    }

    /// Set or overwrite the expiry timestamp for a kind
    pub fn apply(&mut self, kind: StatusKind, expires_at: f64) {
        self.entries.insert(kind, expires_at);
    }

    /// Remove the entry unconditionally, returning whether it was present
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        self.entries.remove(&kind).is_some()
    }

    /// Presence check, regardless of whether the expiry has passed
    pub fn has(&self, kind: StatusKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Expiry timestamp for a kind, if present
    pub fn expiry(&self, kind: StatusKind) -> Option<f64> {
        self.entries.get(&kind).copied()
    }

    /// Drop entries whose expiry is at or before `now`, returning the count
    pub fn purge_expired(&mut self, now: f64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before - self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over (kind, expiry) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (StatusKind, f64)> + '_ {
        self.entries.iter().map(|(k, e)| (*k, *e))
    }
}
