//! End-to-end scenarios: apply -> tick -> expire against a live arena

use ailment_core::prelude::*;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn poison_request(target: ActorId) -> ApplyRequest {
    ApplyRequest::new(
        target,
        EffectParams::Poison(PoisonParams {
            base_damage: 10.0,
            duration: 5.0,
            tick_rate: 1.0,
            slow_amount: 0.1,
            max_stacks: 3,
            stack_damage_multiplier: 0.5,
        }),
    )
}

fn frost_request(target: ActorId, freeze_chance: f64) -> ApplyRequest {
    ApplyRequest::new(
        target,
        EffectParams::Frost(FrostParams {
            direct_damage: 12.0,
            freeze_chance,
            freeze_duration: 2.0,
            chill_duration: 4.0,
            chill_slow_amount: 0.3,
        }),
    )
}

fn burn_request(target: ActorId, splash_radius: Option<f64>) -> ApplyRequest {
    ApplyRequest::new(
        target,
        EffectParams::Burn(BurnParams {
            burst_damage: 15.0,
            dot_damage: 20.0,
            duration: 4.0,
            tick_rate: 0.5,
            splash_radius,
        }),
    )
}

#[test]
fn triple_poison_application_caps_stacks_and_resets_elapsed() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();

    let Applied::Created(id) = engine.apply(&mut arena, &poison_request(target)).unwrap() else {
        panic!("expected creation");
    };
    engine.update(&mut arena, 2.0);
    assert!(engine.effect(id).unwrap().elapsed > 0.0);

    let second = engine.apply(&mut arena, &poison_request(target)).unwrap();
    assert_eq!(
        second,
        Applied::Stacked {
            effect: id,
            stacks: 2
        }
    );
    // Refresh, not extend: elapsed time starts over
    assert!((engine.effect(id).unwrap().elapsed - 0.0).abs() < f64::EPSILON);

    let third = engine.apply(&mut arena, &poison_request(target)).unwrap();
    assert_eq!(
        third,
        Applied::Stacked {
            effect: id,
            stacks: 3
        }
    );

    // 1 - 0.1 * 3 = 0.7
    let actor = arena.get(target).unwrap();
    assert!((actor.speed_multiplier - 0.7).abs() < 1e-9);

    // A fourth application keeps the count at the cap but still refreshes
    engine.update(&mut arena, 3.0);
    let fourth = engine.apply(&mut arena, &poison_request(target)).unwrap();
    assert_eq!(
        fourth,
        Applied::Stacked {
            effect: id,
            stacks: 3
        }
    );
    assert!((engine.effect(id).unwrap().elapsed - 0.0).abs() < f64::EPSILON);
    assert_eq!(engine.live_count(), 1);
}

#[test]
fn poison_refresh_never_extends_past_one_duration() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();

    engine.apply(&mut arena, &poison_request(target)).unwrap();
    engine.update(&mut arena, 4.0);
    engine.apply(&mut arena, &poison_request(target)).unwrap();

    // One full duration after the refresh it is gone; not 4 + 5 seconds
    engine.update(&mut arena, 4.0);
    assert_eq!(engine.live_count(), 1);
    engine.update(&mut arena, 1.0);
    assert_eq!(engine.live_count(), 0);
    let actor = arena.get(target).unwrap();
    assert!((actor.speed_multiplier - 1.0).abs() < f64::EPSILON);
    assert!(!actor.statuses.has(StatusKind::Poisoned));
}

#[test]
fn freeze_cascades_into_chill_before_ending() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    engine
        .apply_with_rng(&mut arena, &frost_request(target, 1.0), &mut rng)
        .unwrap();
    {
        let actor = arena.get(target).unwrap();
        assert!(actor.statuses.has(StatusKind::Frozen));
        assert!((actor.speed_multiplier - 0.0).abs() < f64::EPSILON);
    }

    // Advance to t = 2: freeze duration elapsed, instance must thaw, never
    // end outright
    let mut shifted = false;
    for _ in 0..4 {
        let report = engine.update(&mut arena, 0.5);
        shifted |= report
            .shifts
            .iter()
            .any(|s| s.from == StatusKind::Frozen && s.to == StatusKind::Chilled);
    }
    assert!(shifted);
    assert_eq!(engine.live_count(), 1);
    {
        let actor = arena.get(target).unwrap();
        assert!(!actor.statuses.has(StatusKind::Frozen));
        assert!(actor.statuses.has(StatusKind::Chilled));
        assert!((actor.speed_multiplier - 0.7).abs() < 1e-9);
    }

    // Advance to t = 6: chill duration elapsed, instance ends fully restored
    for _ in 0..8 {
        engine.update(&mut arena, 0.5);
    }
    assert_eq!(engine.live_count(), 0);
    let actor = arena.get(target).unwrap();
    assert!(!actor.statuses.has(StatusKind::Frozen));
    assert!(!actor.statuses.has(StatusKind::Chilled));
    assert!((actor.speed_multiplier - 1.0).abs() < f64::EPSILON);
}

#[test]
fn failed_freeze_roll_still_chills() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();
    let mut rng = StepRng::new(0, 0);

    engine
        .apply_with_rng(&mut arena, &frost_request(target, 0.0), &mut rng)
        .unwrap();
    let actor = arena.get(target).unwrap();
    assert!(!actor.statuses.has(StatusKind::Frozen));
    assert!(actor.statuses.has(StatusKind::Chilled));
    assert!((actor.speed_multiplier - 0.7).abs() < 1e-9);
}

#[test]
fn burn_splash_hits_secondaries_for_half() {
    let mut arena = ActorArena::new();
    let caster = arena.spawn(Actor::new("caster", Archetype::Neutral).with_position(5.0, 5.0));
    let primary = arena.spawn(Actor::new("primary", Archetype::Neutral).with_health(1000.0));
    let near_a = arena.spawn(
        Actor::new("near_a", Archetype::Neutral)
            .with_health(1000.0)
            .with_position(1.0, 0.0),
    );
    let near_b = arena.spawn(
        Actor::new("near_b", Archetype::Neutral)
            .with_health(1000.0)
            .with_position(0.0, 1.5),
    );
    let far = arena.spawn(
        Actor::new("far", Archetype::Neutral)
            .with_health(1000.0)
            .with_position(30.0, 0.0),
    );
    let mut engine = EffectEngine::new();

    let request = burn_request(primary, Some(2.0)).with_source(caster);
    engine.apply(&mut arena, &request).unwrap();

    // Burst: primary takes 15, each secondary exactly 7.5, the far actor
    // and the caster nothing
    assert!((arena.get(primary).unwrap().current_health - 985.0).abs() < 1e-9);
    assert!((arena.get(near_a).unwrap().current_health - 992.5).abs() < 1e-9);
    assert!((arena.get(near_b).unwrap().current_health - 992.5).abs() < 1e-9);
    assert!((arena.get(far).unwrap().current_health - 1000.0).abs() < f64::EPSILON);

    // One tick: primary 20 * (0.5 / 4) = 2.5, secondaries 1.25
    let report = engine.update(&mut arena, 0.5);
    let primary_tick: f64 = report.damage_to(primary).map(|e| e.amount).sum();
    let near_a_tick: f64 = report.damage_to(near_a).map(|e| e.amount).sum();
    assert!((primary_tick - 2.5).abs() < 1e-9);
    assert!((near_a_tick - 1.25).abs() < 1e-9);
    assert!(report.damage_to(near_a).all(|e| e.splash));

    // Secondaries destroyed mid-burn are skipped silently
    arena.destroy(near_a);
    let report = engine.update(&mut arena, 0.5);
    assert_eq!(report.damage_to(near_a).count(), 0);
    let near_b_tick: f64 = report.damage_to(near_b).map(|e| e.amount).sum();
    assert!((near_b_tick - 1.25).abs() < 1e-9);
}

#[test]
fn speed_returns_to_baseline_after_any_combination() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(100000.0));
    let mut engine = EffectEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    engine
        .apply_with_rng(&mut arena, &poison_request(target), &mut rng)
        .unwrap();
    engine
        .apply_with_rng(&mut arena, &burn_request(target, None), &mut rng)
        .unwrap();
    engine
        .apply_with_rng(&mut arena, &frost_request(target, 1.0), &mut rng)
        .unwrap();
    assert_eq!(engine.live_count(), 3);

    // Run far past every duration
    for _ in 0..40 {
        engine.update(&mut arena, 0.5);
    }

    assert_eq!(engine.live_count(), 0);
    let actor = arena.get(target).unwrap();
    assert!(actor.is_alive());
    assert!((actor.speed_multiplier - 1.0).abs() < f64::EPSILON);
    assert!(actor.statuses.is_empty());
}

#[test]
fn cancellation_path_is_idempotent() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let Applied::Created(id) = engine
        .apply_with_rng(&mut arena, &frost_request(target, 1.0), &mut rng)
        .unwrap()
    else {
        panic!("expected creation");
    };
    assert!((arena.get(target).unwrap().speed_multiplier - 0.0).abs() < f64::EPSILON);

    assert!(engine.cancel(&mut arena, id));
    assert!((arena.get(target).unwrap().speed_multiplier - 1.0).abs() < f64::EPSILON);

    // Second cancellation neither double-restores nor panics
    arena.get_mut(target).unwrap().set_speed_multiplier(0.4);
    assert!(!engine.cancel(&mut arena, id));
    assert!((arena.get(target).unwrap().speed_multiplier - 0.4).abs() < f64::EPSILON);
}

#[test]
fn cure_matches_natural_expiry_teardown() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();

    engine.apply(&mut arena, &poison_request(target)).unwrap();
    engine.apply(&mut arena, &poison_request(target)).unwrap();
    assert_eq!(engine.cleanse(&mut arena, target, EffectFamily::Poison), 1);

    let actor = arena.get(target).unwrap();
    assert!((actor.speed_multiplier - 1.0).abs() < f64::EPSILON);
    assert!(!actor.statuses.has(StatusKind::Poisoned));

    // The coordinator slot was released: the next poison is a fresh
    // one-stack instance, not a merge
    let applied = engine.apply(&mut arena, &poison_request(target)).unwrap();
    assert!(matches!(applied, Applied::Created(_)));
    assert!((arena.get(target).unwrap().speed_multiplier - 0.9).abs() < 1e-9);
}

#[test]
fn refreeze_after_overwrite_restarts_freezing() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
    let mut engine = EffectEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    engine
        .apply_with_rng(&mut arena, &frost_request(target, 1.0), &mut rng)
        .unwrap();
    // Thaw into the chill phase
    for _ in 0..5 {
        engine.update(&mut arena, 0.5);
    }
    assert!(arena.get(target).unwrap().statuses.has(StatusKind::Chilled));

    // Re-freezing an already-chilled target replaces the instance and, with
    // a successful roll, restarts the Freezing phase
    engine
        .apply_with_rng(&mut arena, &frost_request(target, 1.0), &mut rng)
        .unwrap();
    assert_eq!(engine.live_count(), 1);
    let actor = arena.get(target).unwrap();
    assert!(actor.statuses.has(StatusKind::Frozen));
    assert!(!actor.statuses.has(StatusKind::Chilled));
    assert!((actor.speed_multiplier - 0.0).abs() < f64::EPSILON);
}

#[test]
fn dot_kills_are_reported_and_instance_unwinds() {
    let mut arena = ActorArena::new();
    let target = arena.spawn(Actor::new("rat", Archetype::Neutral).with_health(3.0));
    let mut engine = EffectEngine::new();

    engine.apply(&mut arena, &poison_request(target)).unwrap();
    // Two ticks of 2 damage finish a 3 health target
    engine.update(&mut arena, 1.0);
    assert!(arena.is_alive(target));
    engine.update(&mut arena, 1.0);
    assert!(!arena.is_alive(target));

    // The next pass absorbs the death silently
    let report = engine.update(&mut arena, 1.0);
    assert!(report
        .ended
        .iter()
        .any(|e| e.target == target && e.reason == EndReason::TargetDestroyed));
    assert_eq!(engine.live_count(), 0);
}

#[test]
fn seeded_frost_rolls_reproduce() {
    let run = |seed: u64| -> Vec<bool> {
        let mut arena = ActorArena::new();
        let mut engine = EffectEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..8)
            .map(|_| {
                let target =
                    arena.spawn(Actor::new("wolf", Archetype::Neutral).with_health(1000.0));
                engine
                    .apply_with_rng(&mut arena, &frost_request(target, 0.5), &mut rng)
                    .unwrap();
                arena.get(target).unwrap().statuses.has(StatusKind::Frozen)
            })
            .collect()
    };
    assert_eq!(run(11), run(11));
}
