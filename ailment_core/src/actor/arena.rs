//! ActorArena - owned, id-keyed actor storage

use crate::actor::Actor;
use crate::area::AreaQuery;
use crate::types::{ActorId, Position};
use std::collections::HashMap;

/// Owned storage for every actor the engine can touch.
///
/// The arena is plain owned state handed to the engine by the caller; there
/// is no global lookup. Destruction is permanent: a destroyed actor keeps
/// its slot with the alive flag lowered, so a stale id resolves to "not
/// alive" instead of dangling.
#[derive(Debug, Clone, Default)]
pub struct ActorArena {
    actors: HashMap<ActorId, Actor>,
    next_id: u64,
}

impl ActorArena {
    /// Create an empty arena
    pub fn new() -> Self {
        ActorArena {
            actors: HashMap::new(),
            next_id: 0,
        }
    }

    /// Insert an actor, assigning and returning its id
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.next_id += 1;
        let id = ActorId(self.next_id);
        let mut actor = actor;
        actor.id = id;
        self.actors.insert(id, actor);
        id
    }

    /// Mark an actor destroyed. Idempotent; the slot is retained so the id
    /// stays resolvable and `is_alive` answers false from here on.
    pub fn destroy(&mut self, id: ActorId) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.alive = false;
        }
    }

    /// Liveness check. Unknown ids count as destroyed.
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actors.get(&id).is_some_and(|a| a.alive)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Route damage to an actor's health capability (fire-and-forget).
    /// Returns the damage actually applied.
    pub fn apply_damage(&mut self, id: ActorId, amount: f64) -> f64 {
        self.actors
            .get_mut(&id)
            .map_or(0.0, |a| a.apply_damage(amount))
    }

    /// Route a movement multiplier to an actor's movable capability
    pub fn set_speed_multiplier(&mut self, id: ActorId, value: f64) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.set_speed_multiplier(value);
        }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.actors.values().filter(|a| a.alive).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.values_mut()
    }
}

impl AreaQuery for ActorArena {
    fn within_radius(&self, origin: Position, radius: f64) -> Vec<ActorId> {
        self.actors
            .values()
            .filter(|a| a.alive && a.position.distance_to(origin) <= radius)
            .map(|a| a.id)
            .collect()
    }
}
