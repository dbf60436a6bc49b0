//! EffectEngine - request resolution and the shared tick scheduler
//!
//! The engine owns the simulation clock, the live instance list, the poison
//! stack coordinator and the resistance table. All work is synchronous and
//! frame-driven: `update` advances every live instance at most once per
//! tick-interval crossing, and the relative order of instances on different
//! targets is unspecified.

mod report;
mod stacks;

pub use report::{DamageEvent, EndReason, EndedEffect, PhaseShift, TickReport};
pub use stacks::StackCoordinator;

use crate::actor::{ActorArena, Veil};
use crate::area::AreaQuery;
use crate::effect::{
    ActiveEffect, Applied, ApplyError, ApplyRequest, BurnParams, BurnState, EffectFamily,
    EffectParams, EffectState, FrostParams, FrostPhase, FrostState, PoisonParams, PoisonState,
    SPLASH_FACTOR,
};
use crate::resist::ResistanceTable;
use crate::types::{ActorId, EffectId, StatusKind};
use rand::Rng;
use tracing::{debug, warn};

/// Tolerance for tick-boundary comparisons
const TICK_EPSILON: f64 = 1e-9;

/// Drives every live effect instance against a shared simulation clock.
///
/// The clock only moves through [`update`](Self::update); the engine never
/// reads wall time. Instances manage their own lifetime: callers may keep
/// the returned [`EffectId`] for cancellation but are not required to.
#[derive(Debug)]
pub struct EffectEngine {
    now: f64,
    next_effect: u64,
    effects: Vec<ActiveEffect>,
    stacks: StackCoordinator,
    resistances: ResistanceTable,
    /// Endings produced outside an update pass (cancel, overwrite), drained
    /// into the next report
    pending_ended: Vec<EndedEffect>,
}

impl Default for EffectEngine {
    fn default() -> Self {
        EffectEngine::new()
    }
}

impl EffectEngine {
    /// Create an engine with the built-in kingdom resistances
    pub fn new() -> Self {
        EffectEngine {
            now: 0.0,
            next_effect: 0,
            effects: Vec::new(),
            stacks: StackCoordinator::new(),
            resistances: ResistanceTable::with_defaults(),
            pending_ended: Vec::new(),
        }
    }

    /// Replace the resistance table
    pub fn with_resistances(mut self, resistances: ResistanceTable) -> Self {
        self.resistances = resistances;
        self
    }

    /// Current simulation timestamp
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of live instances
    pub fn live_count(&self) -> usize {
        self.effects.iter().filter(|e| !e.finished).count()
    }

    /// Look up a live instance by id
    pub fn effect(&self, id: EffectId) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.id == id && !e.finished)
    }

    /// Live instances attached to one target
    pub fn effects_on(&self, target: ActorId) -> impl Iterator<Item = &ActiveEffect> {
        self.effects
            .iter()
            .filter(move |e| e.target == target && !e.finished)
    }

    /// Resolve an application request using thread-local randomness
    pub fn apply(
        &mut self,
        arena: &mut ActorArena,
        request: &ApplyRequest,
    ) -> Result<Applied, ApplyError> {
        let mut rng = rand::thread_rng();
        self.apply_with_rng(arena, request, &mut rng)
    }

    /// Resolve an application request with a provided RNG (for deterministic
    /// testing).
    ///
    /// Rejected requests construct nothing and surface an [`ApplyError`];
    /// requests against destroyed targets are absorbed silently and answer
    /// [`Applied::StaleTarget`].
    pub fn apply_with_rng(
        &mut self,
        arena: &mut ActorArena,
        request: &ApplyRequest,
        rng: &mut impl Rng,
    ) -> Result<Applied, ApplyError> {
        if let Err(err) = request.params.validate() {
            warn!(actor = ?request.target, %err, "rejected effect application");
            return Err(err);
        }
        if !arena.is_alive(request.target) {
            debug!(actor = ?request.target, "application against destroyed target dropped");
            return Ok(Applied::StaleTarget);
        }

        if matches!(request.params, EffectParams::Poison(_)) {
            // Poison re-applications merge into the live instance instead of
            // spawning a duplicate.
            if let Some(effect_id) = self.stacks.lookup(request.target) {
                if let Some(applied) = self.merge_poison(arena, request.target, effect_id) {
                    return Ok(applied);
                }
                self.stacks.release(request.target);
            }
        } else {
            // Non-stacking kinds overwrite: the old instance runs its full
            // teardown before the replacement is built.
            self.overwrite_existing(arena, request.target, request.params.family());
        }

        let params = self.scaled_params(arena, request.target, &request.params);
        let applied = match params {
            EffectParams::Poison(p) => self.start_poison(arena, request.target, p),
            EffectParams::Burn(p) => self.start_burn(arena, request.target, request.source, p),
            EffectParams::Frost(p) => self.start_frost(arena, request.target, p, rng),
        };
        Ok(applied)
    }

    /// Advance the clock by `delta` and tick every live instance.
    ///
    /// Ends with a housekeeping pass that prunes registry entries and veils
    /// older than the clock.
    pub fn update(&mut self, arena: &mut ActorArena, delta: f64) -> TickReport {
        self.now += delta;
        let now = self.now;
        let mut report = TickReport::new();
        report.ended.append(&mut self.pending_ended);

        for effect in self.effects.iter_mut() {
            if effect.finished {
                continue;
            }
            if !arena.is_alive(effect.target) {
                teardown_effect(
                    effect,
                    arena,
                    &mut self.stacks,
                    EndReason::TargetDestroyed,
                    &mut report.ended,
                );
                continue;
            }
            effect.elapsed += delta;
            advance_effect(effect, arena, &mut self.stacks, now, delta, &mut report);
        }
        self.effects.retain(|e| !e.finished);

        for actor in arena.iter_mut() {
            actor.statuses.purge_expired(now);
            if actor.veil.is_some_and(|v| !v.is_active(now)) {
                actor.veil = None;
            }
        }
        report
    }

    /// Cancel one instance through the normal teardown path.
    ///
    /// Safe to call again on an already-ended instance; the second call is a
    /// no-op and answers false.
    pub fn cancel(&mut self, arena: &mut ActorArena, effect: EffectId) -> bool {
        let mut cancelled = false;
        if let Some(e) = self.effects.iter_mut().find(|e| e.id == effect) {
            if !e.finished {
                teardown_effect(
                    e,
                    arena,
                    &mut self.stacks,
                    EndReason::Cleansed,
                    &mut self.pending_ended,
                );
                cancelled = true;
            }
        }
        self.effects.retain(|e| !e.finished);
        cancelled
    }

    /// Remove every live instance of one family from a target (cure
    /// abilities). Returns the number of instances removed.
    pub fn cleanse(
        &mut self,
        arena: &mut ActorArena,
        target: ActorId,
        family: EffectFamily,
    ) -> usize {
        let mut removed = 0;
        for effect in self.effects.iter_mut() {
            if effect.target == target && effect.family() == family && !effect.finished {
                teardown_effect(
                    effect,
                    arena,
                    &mut self.stacks,
                    EndReason::Cleansed,
                    &mut self.pending_ended,
                );
                removed += 1;
            }
        }
        self.effects.retain(|e| !e.finished);
        removed
    }

    /// Registry-only timed flag for kinds with no ticking instance behind
    /// them (stun, root). Answers false against a destroyed target.
    pub fn apply_flag(
        &mut self,
        arena: &mut ActorArena,
        target: ActorId,
        kind: StatusKind,
        duration: f64,
    ) -> Result<bool, ApplyError> {
        if duration <= 0.0 {
            warn!(actor = ?target, ?kind, duration, "rejected status flag");
            return Err(ApplyError::NonPositiveDuration(duration));
        }
        if !arena.is_alive(target) {
            return Ok(false);
        }
        mark_status(arena, target, kind, self.now + duration);
        Ok(true)
    }

    /// Open a transient resistance window on an actor (stealth and similar
    /// states). While active it composes multiplicatively with the archetype
    /// table; it never replaces it.
    pub fn veil(&mut self, arena: &mut ActorArena, target: ActorId, multiplier: f64, duration: f64) {
        if multiplier <= 0.0 || multiplier > 1.0 || duration <= 0.0 {
            warn!(actor = ?target, multiplier, duration, "rejected veil window");
            return;
        }
        if let Some(actor) = arena.get_mut(target) {
            if actor.alive {
                actor.veil = Some(Veil {
                    multiplier,
                    expires_at: self.now + duration,
                });
            }
        }
    }

    fn alloc_id(&mut self) -> EffectId {
        self.next_effect += 1;
        EffectId(self.next_effect)
    }

    /// Duration scaling: archetype multiplier times any active veil, looked
    /// up once here and never again for the instance's lifetime.
    fn scaled_params(
        &self,
        arena: &ActorArena,
        target: ActorId,
        params: &EffectParams,
    ) -> EffectParams {
        let mut params = params.clone();
        let Some(actor) = arena.get(target) else {
            return params;
        };
        let veil_mult = actor
            .veil
            .filter(|v| v.is_active(self.now))
            .map_or(1.0, |v| v.multiplier);
        match &mut params {
            EffectParams::Poison(p) => {
                p.duration *=
                    self.resistances.multiplier(actor.archetype, StatusKind::Poisoned) * veil_mult;
            }
            EffectParams::Burn(p) => {
                p.duration *=
                    self.resistances.multiplier(actor.archetype, StatusKind::Burning) * veil_mult;
            }
            EffectParams::Frost(p) => {
                p.freeze_duration *=
                    self.resistances.multiplier(actor.archetype, StatusKind::Frozen) * veil_mult;
                p.chill_duration *=
                    self.resistances.multiplier(actor.archetype, StatusKind::Chilled) * veil_mult;
            }
        }
        params
    }

    fn merge_poison(
        &mut self,
        arena: &mut ActorArena,
        target: ActorId,
        effect_id: EffectId,
    ) -> Option<Applied> {
        let now = self.now;
        let effect = self
            .effects
            .iter_mut()
            .find(|e| e.id == effect_id && !e.finished)?;
        let EffectState::Poison(state) = &mut effect.state else {
            return None;
        };
        let stacks = state.add_stack();
        let slow = state.slow_multiplier();
        let expiry = now + state.params.duration;
        // Refresh, never extend: elapsed time starts over at every merge.
        effect.elapsed = 0.0;
        arena.set_speed_multiplier(target, slow);
        mark_status(arena, target, StatusKind::Poisoned, expiry);
        debug!(actor = ?target, effect = ?effect_id, stacks, "poison re-application merged");
        Some(Applied::Stacked {
            effect: effect_id,
            stacks,
        })
    }

    fn overwrite_existing(&mut self, arena: &mut ActorArena, target: ActorId, family: EffectFamily) {
        for effect in self.effects.iter_mut() {
            if effect.target == target && effect.family() == family && !effect.finished {
                teardown_effect(
                    effect,
                    arena,
                    &mut self.stacks,
                    EndReason::Overwritten,
                    &mut self.pending_ended,
                );
            }
        }
        self.effects.retain(|e| !e.finished);
    }

    fn start_poison(
        &mut self,
        arena: &mut ActorArena,
        target: ActorId,
        params: PoisonParams,
    ) -> Applied {
        let state = PoisonState::new(params);
        let slow = state.slow_multiplier();
        let expiry = self.now + state.params.duration;
        let tick_rate = state.params.tick_rate;
        arena.set_speed_multiplier(target, slow);
        mark_status(arena, target, StatusKind::Poisoned, expiry);
        let id = self.alloc_id();
        self.stacks.register(target, id);
        self.effects.push(ActiveEffect {
            id,
            target,
            elapsed: 0.0,
            time_until_tick: tick_rate,
            finished: false,
            state: EffectState::Poison(state),
        });
        debug!(actor = ?target, effect = ?id, "poison applied");
        Applied::Created(id)
    }

    fn start_burn(
        &mut self,
        arena: &mut ActorArena,
        target: ActorId,
        source: Option<ActorId>,
        params: BurnParams,
    ) -> Applied {
        arena.apply_damage(target, params.burst_damage);
        let mut secondaries = Vec::new();
        if let Some(radius) = params.splash_radius {
            // One-shot snapshot around the primary target; the caster and
            // the primary itself are excluded.
            if let Some(origin) = arena.get(target).map(|a| a.position) {
                for id in AreaQuery::within_radius(arena, origin, radius) {
                    if id == target || Some(id) == source {
                        continue;
                    }
                    arena.apply_damage(id, params.burst_damage * SPLASH_FACTOR);
                    secondaries.push(id);
                }
            }
        }
        mark_status(arena, target, StatusKind::Burning, self.now + params.duration);
        let tick_rate = params.tick_rate;
        let splash_count = secondaries.len();
        let id = self.alloc_id();
        self.effects.push(ActiveEffect {
            id,
            target,
            elapsed: 0.0,
            time_until_tick: tick_rate,
            finished: false,
            state: EffectState::Burn(BurnState::new(params, secondaries)),
        });
        debug!(actor = ?target, effect = ?id, splash_count, "burn applied");
        Applied::Created(id)
    }

    fn start_frost(
        &mut self,
        arena: &mut ActorArena,
        target: ActorId,
        params: FrostParams,
        rng: &mut impl Rng,
    ) -> Applied {
        arena.apply_damage(target, params.direct_damage);
        let frozen = rng.gen::<f64>() < params.clamped_freeze_chance();
        let state = FrostState::new(params, frozen);
        let phase_duration = state.phase_duration();
        arena.set_speed_multiplier(target, state.speed_multiplier());
        mark_status(arena, target, state.kind(), self.now + phase_duration);
        let id = self.alloc_id();
        self.effects.push(ActiveEffect {
            id,
            target,
            elapsed: 0.0,
            time_until_tick: phase_duration,
            finished: false,
            state: EffectState::Frost(state),
        });
        debug!(actor = ?target, effect = ?id, frozen, "frost applied");
        Applied::Created(id)
    }
}

/// Advance one live instance by `delta`. The liveness check has already
/// passed for this pass; mid-pass deaths are absorbed by the damage sink and
/// picked up at the next update.
fn advance_effect(
    effect: &mut ActiveEffect,
    arena: &mut ActorArena,
    stacks: &mut StackCoordinator,
    now: f64,
    delta: f64,
    report: &mut TickReport,
) {
    let target = effect.target;
    match effect.state {
        EffectState::Poison(ref state) => {
            let duration = state.params.duration;
            let tick_rate = state.params.tick_rate;
            let damage = state.tick_damage();
            effect.time_until_tick -= delta;
            while effect.time_until_tick <= 0.0
                && effect.elapsed + effect.time_until_tick <= duration + TICK_EPSILON
            {
                arena.apply_damage(target, damage);
                report.add_damage(target, StatusKind::Poisoned, damage, false);
                effect.time_until_tick += tick_rate;
            }
            if effect.elapsed >= duration {
                teardown_effect(effect, arena, stacks, EndReason::Elapsed, &mut report.ended);
            }
        }
        EffectState::Burn(ref state) => {
            let duration = state.params.duration;
            let tick_rate = state.params.tick_rate;
            let primary_damage = state.primary_tick_damage();
            let secondary_damage = state.secondary_tick_damage();
            let secondaries = state.secondaries.clone();
            effect.time_until_tick -= delta;
            while effect.time_until_tick <= 0.0
                && effect.elapsed + effect.time_until_tick <= duration + TICK_EPSILON
            {
                arena.apply_damage(target, primary_damage);
                report.add_damage(target, StatusKind::Burning, primary_damage, false);
                for &secondary in &secondaries {
                    // Members destroyed since application are skipped, never
                    // re-queried.
                    if arena.is_alive(secondary) {
                        arena.apply_damage(secondary, secondary_damage);
                        report.add_damage(secondary, StatusKind::Burning, secondary_damage, true);
                    }
                }
                effect.time_until_tick += tick_rate;
            }
            if effect.elapsed >= duration {
                teardown_effect(effect, arena, stacks, EndReason::Elapsed, &mut report.ended);
            }
        }
        EffectState::Frost(ref mut state) => {
            // A large step can cross the freeze boundary and spill into the
            // chill phase within the same pass.
            let mut ended = false;
            while effect.elapsed >= state.phase_duration() {
                match state.phase {
                    FrostPhase::Freezing => {
                        effect.elapsed -= state.phase_duration();
                        state.thaw();
                        arena.set_speed_multiplier(target, state.speed_multiplier());
                        if let Some(actor) = arena.get_mut(target) {
                            if actor.caps.status_sink {
                                actor.statuses.remove(StatusKind::Frozen);
                                actor.statuses.apply(
                                    StatusKind::Chilled,
                                    now + state.params.chill_duration - effect.elapsed,
                                );
                            }
                        }
                        report.shifts.push(PhaseShift {
                            effect: effect.id,
                            target,
                            from: StatusKind::Frozen,
                            to: StatusKind::Chilled,
                        });
                        debug!(actor = ?target, effect = ?effect.id, "freeze thawed into chill");
                    }
                    FrostPhase::Chilling => {
                        ended = true;
                        break;
                    }
                }
            }
            if ended {
                teardown_effect(effect, arena, stacks, EndReason::Elapsed, &mut report.ended);
            }
        }
    }
}

/// The single teardown path: natural expiry, target destruction, cleansing
/// and overwriting all land here. Exactly-once per instance; a second call
/// returns without touching anything.
fn teardown_effect(
    effect: &mut ActiveEffect,
    arena: &mut ActorArena,
    stacks: &mut StackCoordinator,
    reason: EndReason,
    ended: &mut Vec<EndedEffect>,
) {
    if effect.finished {
        return;
    }
    effect.finished = true;
    let kind = effect.kind();
    let target = effect.target;
    match effect.state {
        EffectState::Poison(_) => {
            arena.set_speed_multiplier(target, 1.0);
            clear_status(arena, target, StatusKind::Poisoned);
            stacks.release(target);
        }
        EffectState::Burn(ref mut state) => {
            // Burn never touches speed; clearing the splash list is the
            // whole teardown.
            state.secondaries.clear();
            clear_status(arena, target, StatusKind::Burning);
        }
        EffectState::Frost(_) => {
            arena.set_speed_multiplier(target, 1.0);
            clear_status(arena, target, kind);
        }
    }
    ended.push(EndedEffect {
        effect: effect.id,
        target,
        kind,
        reason,
    });
    debug!(actor = ?target, effect = ?effect.id, ?kind, ?reason, "effect ended");
}

fn mark_status(arena: &mut ActorArena, target: ActorId, kind: StatusKind, expires_at: f64) {
    if let Some(actor) = arena.get_mut(target) {
        if actor.caps.status_sink {
            actor.statuses.apply(kind, expires_at);
        }
    }
}

fn clear_status(arena: &mut ActorArena, target: ActorId, kind: StatusKind) {
    if let Some(actor) = arena.get_mut(target) {
        actor.statuses.remove(kind);
    }
}
