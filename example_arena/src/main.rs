//! Example Arena - a seeded skirmish demonstrating ailment_core
//!
//! Spawns a small pack of enemies around a hero, throws elemental abilities
//! at them on a fixed schedule, and prints what the engine reports as the
//! clock advances. The run is fully deterministic: same seed, same fight.

use ailment_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Simulation step in seconds
const STEP: f64 = 0.5;
/// Total simulated time
const DURATION: f64 = 12.0;

/// A scheduled ability use: (time, ability id, target index)
const SCRIPT: &[(f64, &str, usize)] = &[
    (0.0, "venom_spit", 0),
    (0.5, "ember_burst", 1),
    (1.0, "venom_spit", 0),
    (1.5, "rime_nova", 2),
    (2.0, "venom_spit", 0),
    (4.0, "rime_nova", 2),
    (5.0, "cinder_lash", 0),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut arena = ActorArena::new();
    let mut engine = EffectEngine::new();
    let book = AbilityBook::with_defaults();

    let hero = arena.spawn(
        Actor::new("hero", Archetype::Neutral)
            .with_health(200.0)
            .with_position(-3.0, 0.0),
    );
    let enemies = vec![
        arena.spawn(
            Actor::new("mire wolf", Archetype::Mirefolk)
                .with_health(80.0)
                .with_speed(2.0)
                .with_position(0.0, 0.0),
        ),
        arena.spawn(
            Actor::new("cinder imp", Archetype::Cinderkin)
                .with_health(60.0)
                .with_speed(2.5)
                .with_position(1.0, 0.5),
        ),
        arena.spawn(
            Actor::new("rime stalker", Archetype::Rimeborn)
                .with_health(90.0)
                .with_speed(3.0)
                .with_position(1.5, -1.0),
        ),
    ];

    info!(enemies = enemies.len(), "skirmish start");
    println!("=== skirmish: 1 hero vs {} enemies ===", enemies.len());

    let mut script = SCRIPT.iter().peekable();
    let mut step = 0u32;
    while engine.now() < DURATION {
        while let Some(&&(at, ability, target_index)) = script.peek() {
            if at > engine.now() {
                break;
            }
            script.next();
            cast(&mut engine, &mut arena, &book, &mut rng, hero, ability, enemies[target_index]);
        }

        let report = engine.update(&mut arena, STEP);
        step += 1;
        if !report.is_quiet() {
            println!("[t={:5.1}] {}", engine.now(), report.summary());
        }
        if step % 8 == 0 {
            print_roster(&arena, &enemies);
        }
    }

    println!("=== after {:.0}s ===", engine.now());
    print_roster(&arena, &enemies);
    println!("live effects: {}", engine.live_count());
}

fn cast(
    engine: &mut EffectEngine,
    arena: &mut ActorArena,
    book: &AbilityBook,
    rng: &mut ChaCha8Rng,
    caster: ActorId,
    ability: &str,
    target: ActorId,
) {
    let Some(params) = book.params(ability) else {
        println!("unknown ability '{ability}'");
        return;
    };
    let request = ApplyRequest::new(target, params.clone()).with_source(caster);
    match engine.apply_with_rng(arena, &request, rng) {
        Ok(Applied::Created(_)) => {
            println!("[t={:5.1}] {} hits {}", engine.now(), ability, name_of(arena, target));
        }
        Ok(Applied::Stacked { stacks, .. }) => {
            println!(
                "[t={:5.1}] {} stacks on {} (x{})",
                engine.now(),
                ability,
                name_of(arena, target),
                stacks
            );
        }
        Ok(Applied::StaleTarget) => {
            println!("[t={:5.1}] {} fizzles, target is gone", engine.now(), ability);
        }
        Err(err) => println!("[t={:5.1}] {} rejected: {}", engine.now(), ability, err),
    }
}

fn name_of(arena: &ActorArena, id: ActorId) -> String {
    arena
        .get(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "?".to_string())
}

fn print_roster(arena: &ActorArena, enemies: &[ActorId]) {
    for &id in enemies {
        let Some(actor) = arena.get(id) else { continue };
        let statuses: Vec<String> = actor.statuses.iter().map(|(k, _)| format!("{k:?}")).collect();
        println!(
            "    {:<13} hp {:6.1}/{:<6.1} speed {:4.2} {}",
            actor.name,
            actor.current_health,
            actor.max_health,
            actor.current_speed(),
            if actor.is_alive() {
                statuses.join("+")
            } else {
                "dead".to_string()
            }
        );
    }
}
