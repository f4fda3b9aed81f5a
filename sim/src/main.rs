//! Headless simulation harness.
//!
//! Runs the monster simulation against an in-memory host at the fixed tick
//! rate and logs what happens. Usage:
//!
//!     horde-sim [templates.json] [config.json]

use std::time::{Duration, Instant};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use horde_shared::{CharacterId, CombatStats, Position, SIM_TICK_RATE};

use horde_sim::{
    Collaborators, MemoryCharacter, MonsterTemplateRegistry, SharedHost, SimConfig,
    SimulationScheduler, SystemClock, WaveConfig, WaveSpawner,
};

/// How long the harness runs before printing a summary
const RUN_SECS: u64 = 30;

/// How often the party swings at the nearest monster
const PARTY_ATTACK_INTERVAL_MS: u64 = 700;

const PARTY_DAMAGE: u32 = 60;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);

    let registry = match args.next() {
        Some(path) => MonsterTemplateRegistry::load_from_json(&path),
        None => MonsterTemplateRegistry::with_defaults(),
    };
    let registry = match registry {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load templates: {}", e);
            return;
        }
    };

    let config = match args.next() {
        Some(path) => match SimConfig::load_from_json(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config: {}", e);
                return;
            }
        },
        None => SimConfig::default(),
    };

    info!("Starting horde simulation...");
    info!("Tick rate: {} Hz", SIM_TICK_RATE);
    info!("Archetypes: {:?}", registry.archetype_ids());

    // Party standing near the left of the screen
    let host = SharedHost::new();
    {
        let mut state = host.borrow_mut();
        state.add_character(MemoryCharacter::new(1, Position::new(200.0, 300.0), 500, CombatStats::new(25, 6)));
        state.add_character(MemoryCharacter::new(
            2,
            Position::new(260.0, 420.0),
            350,
            CombatStats::new(40, 3).with_evasion(0.1),
        ));
    }

    let mut scheduler = SimulationScheduler::new(
        registry,
        config,
        Box::new(SystemClock::new()),
        Collaborators::from_shared(&host),
    );
    let mut spawner = WaveSpawner::new(WaveConfig::default());
    let mut rng = StdRng::from_entropy();

    let tick_duration = Duration::from_secs_f64(1.0 / SIM_TICK_RATE as f64);
    let run_for = Duration::from_secs(RUN_SECS);
    let started = Instant::now();
    let mut last_tick = Instant::now();
    let mut since_party_attack_ms: u64 = 0;
    let mut tick_count: u64 = 0;
    let mut attacks: usize = 0;

    info!("Simulation started, running for {}s", RUN_SECS);

    // Main loop
    while started.elapsed() < run_for {
        let tick_start = Instant::now();
        let delta_ms = last_tick.elapsed().as_millis() as u64;
        last_tick = Instant::now();

        for request in spawner.update(delta_ms, scheduler.get_active_count(), &mut rng) {
            if let Err(e) = scheduler.spawn_monster(&request.archetype_id, request.level, request.position) {
                warn!("Spawn failed: {}", e);
            }
        }

        let stats = scheduler.tick(delta_ms);
        attacks += stats.attacks;

        // Party hits a random live monster
        since_party_attack_ms += delta_ms;
        if since_party_attack_ms >= PARTY_ATTACK_INTERVAL_MS {
            since_party_attack_ms = 0;
            let targets: Vec<_> = scheduler
                .directory()
                .iter()
                .filter(|m| !m.is_dead)
                .map(|m| m.id)
                .collect();
            if !targets.is_empty() {
                let target = targets[rng.gen_range(0..targets.len())];
                let source = CharacterId(rng.gen_range(1..=2));
                if let Err(e) = scheduler.apply_damage_to_monster(target, PARTY_DAMAGE, source) {
                    warn!("Party attack failed: {}", e);
                }
            }
        }

        tick_count += 1;
        if tick_count % (SIM_TICK_RATE as u64 * 5) == 0 {
            info!(
                "tick {}: {} active, {} monster attacks so far",
                tick_count,
                scheduler.get_active_count(),
                attacks
            );
        }

        // Sleep until next tick
        let elapsed = tick_start.elapsed();
        if elapsed < tick_duration {
            tokio::time::sleep(tick_duration - elapsed).await;
        }
    }

    scheduler.clear_all();

    let state = host.borrow();
    info!("Simulation finished after {} ticks", tick_count);
    info!("Kills: {}", state.events_named("monsterKilled").len());
    info!("Copper earned: {}", state.currency);
    for (item_id, quantity) in &state.inventory {
        info!("  {} x{}", item_id, quantity);
    }
    for id in [CharacterId(1), CharacterId(2)] {
        if let Some(character) = state.character(id) {
            info!(
                "{}: {}/{} hp, {} xp",
                id, character.health, character.max_health, character.experience
            );
        }
    }
}
