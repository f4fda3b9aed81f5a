//! End-to-end behaviour of the simulation scheduler.
//!
//! Every test drives the scheduler with a manual clock and an in-memory
//! host, so timings are exact and every outward call is observable.

use std::collections::HashSet;

use horde_shared::{
    get_monster_templates, CharacterId, CombatStats, DespawnReason, DropEntry, MonsterId,
    MonsterTemplate, MovementState, Position, SimEvent,
};
use horde_sim::combat::LootDrop;
use horde_sim::{
    Clock, Collaborators, EffectKind, ManualClock, MemoryCharacter, MonsterTemplateRegistry,
    SharedHost, SimConfig, SimError, SimulationScheduler,
};

const SEED: u64 = 42;

struct Fixture {
    sim: SimulationScheduler,
    host: SharedHost,
    clock: ManualClock,
}

impl Fixture {
    fn new(templates: Vec<MonsterTemplate>, config: SimConfig) -> Self {
        let registry = MonsterTemplateRegistry::from_templates(templates).unwrap();
        let host = SharedHost::new();
        let clock = ManualClock::new(0);
        let sim = SimulationScheduler::with_seed(
            registry,
            config,
            Box::new(clock.clone()),
            Collaborators::from_shared(&host),
            SEED,
        );
        Self { sim, host, clock }
    }

    fn defaults() -> Self {
        Self::new(get_monster_templates(), SimConfig::default())
    }

    fn add_character(&self, id: u64, position: Position, stats: CombatStats) {
        self.host
            .borrow_mut()
            .add_character(MemoryCharacter::new(id, position, 500, stats));
    }

    /// Advance the clock and run one tick
    fn step(&mut self, delta_ms: u64) {
        self.clock.advance(delta_ms);
        self.sim.tick(delta_ms);
    }

    fn count(&self, name: &str) -> usize {
        self.host.borrow().events_named(name).len()
    }
}

/// Slime with deterministic combat numbers and a custom drop table
fn dummy(archetype_id: &str, defense: u32, drop_rate: f64, drop_table: Vec<DropEntry>) -> MonsterTemplate {
    let mut template = get_monster_templates()
        .into_iter()
        .find(|t| t.archetype_id == "slime")
        .unwrap();
    template.archetype_id = archetype_id.to_string();
    template.base_defense = defense;
    template.drop_rate = drop_rate;
    template.drop_table = drop_table;
    template
}

#[test]
fn spawn_scales_with_level() {
    let mut fx = Fixture::defaults();

    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    let slime = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(slime.health, 250);
    assert_eq!(slime.max_health, 250);
    assert_eq!(slime.attack, 10);
    assert_eq!(slime.width, 64.0);

    let id = fx.sim.spawn_monster("slime", 3, Position::new(800.0, 300.0)).unwrap();
    let big = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(big.health, 750);
    assert_eq!(big.attack, 30);
    assert!((big.width - 64.0 * 1.10).abs() < 1e-3);

    assert_eq!(fx.count("monsterSpawned"), 2);
    assert_eq!(fx.sim.get_active_count(), 2);
}

#[test]
fn spawn_unknown_archetype_fails() {
    let mut fx = Fixture::defaults();
    let err = fx.sim.spawn_monster("lich", 1, Position::default()).unwrap_err();
    assert_eq!(err, SimError::UnknownArchetype("lich".into()));
    assert_eq!(fx.sim.get_active_count(), 0);
    assert_eq!(fx.count("monsterSpawned"), 0);
}

#[test]
fn damage_has_a_floor_of_one() {
    let mut fx = Fixture::new(vec![dummy("wall", 10, 0.0, vec![])], SimConfig::default());
    let id = fx.sim.spawn_monster("wall", 1, Position::new(800.0, 300.0)).unwrap();

    let outcome = fx.sim.apply_damage_to_monster(id, 5, CharacterId(1)).unwrap();
    assert_eq!(outcome.damage, 1);
    assert_eq!(outcome.remaining_health, 249);
    assert!(!outcome.killed);
    assert!(outcome.payout.is_none());
}

#[test]
fn loot_respects_entry_chances() {
    let table = vec![DropEntry::new("a", 1.0, 1, 1), DropEntry::new("b", 0.0, 1, 1)];
    let mut fx = Fixture::new(vec![dummy("chest", 0, 1.0, table)], SimConfig::default());
    fx.add_character(1, Position::new(100.0, 300.0), CombatStats::default());

    let id = fx.sim.spawn_monster("chest", 1, Position::new(800.0, 300.0)).unwrap();
    let outcome = fx.sim.apply_damage_to_monster(id, 10_000, CharacterId(1)).unwrap();

    let payout = outcome.payout.unwrap();
    assert_eq!(payout.drops, vec![LootDrop { item_id: "a".into(), quantity: 1 }]);

    let host = fx.host.borrow();
    assert_eq!(host.item_count("a"), 1);
    assert_eq!(host.item_count("b"), 0);
}

#[test]
fn second_attack_inside_cooldown_is_suppressed() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(250.0, 300.0), CombatStats::default());
    let id = fx.sim.spawn_monster("slime", 1, Position::new(300.0, 300.0)).unwrap();

    // Cooldown counts from spawn
    fx.step(1000);
    assert_eq!(fx.count("characterDamaged"), 0);

    fx.step(1000);
    assert_eq!(fx.count("characterDamaged"), 1);
    assert_eq!(fx.sim.get_monster_by_id(id).unwrap().last_attack_at_ms, 2000);

    fx.clock.advance(500);
    let err = fx.sim.monster_attacks_character(id, CharacterId(1)).unwrap_err();
    assert_eq!(err, SimError::AttackOnCooldown(id));
    assert_eq!(fx.count("characterDamaged"), 1);
    assert_eq!(fx.sim.get_monster_by_id(id).unwrap().last_attack_at_ms, 2000);

    let host = fx.host.borrow();
    assert_eq!(host.character(CharacterId(1)).unwrap().health, 490);
}

#[test]
fn attacks_never_come_faster_than_cooldown() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(250.0, 300.0), CombatStats::default());
    let id = fx.sim.spawn_monster("bat", 1, Position::new(300.0, 300.0)).unwrap();
    let cooldown = fx.sim.get_monster_by_id(id).unwrap().attack_cooldown_ms;

    let mut attack_times = Vec::new();
    let mut last_seen = 0;
    for _ in 0..300 {
        fx.step(35);
        let at = fx.sim.get_monster_by_id(id).unwrap().last_attack_at_ms;
        if at != last_seen {
            attack_times.push(at);
            last_seen = at;
        }
    }

    assert!(attack_times.len() >= 5);
    for pair in attack_times.windows(2) {
        assert!(pair[1] - pair[0] >= cooldown);
    }
}

#[test]
fn evasive_character_is_missed() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(250.0, 300.0), CombatStats::default().with_evasion(1.0));
    let id = fx.sim.spawn_monster("slime", 1, Position::new(300.0, 300.0)).unwrap();

    fx.clock.set(2000);
    let outcome = fx.sim.monster_attacks_character(id, CharacterId(1)).unwrap();
    assert!(outcome.result.is_miss);
    assert_eq!(outcome.result.damage, 0);
    assert_eq!(outcome.character_health, 500);
    assert_eq!(fx.count("monsterMissed"), 1);
    assert_eq!(fx.count("characterDamaged"), 0);
}

#[test]
fn stunned_monster_neither_moves_nor_attacks() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(250.0, 300.0), CombatStats::default());
    let id = fx.sim.spawn_monster("slime", 1, Position::new(300.0, 300.0)).unwrap();

    fx.step(100);
    let before = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(before.movement_state, MovementState::Stopped);

    fx.clock.set(1900);
    fx.sim.apply_damage_to_monster(id, 10, CharacterId(1)).unwrap();

    // Cooldown is up at 2000 but the stun holds until 2400
    for _ in 0..4 {
        fx.step(100);
        let monster = fx.sim.get_monster_by_id(id).unwrap();
        assert_eq!(monster.movement_state, before.movement_state);
        assert_eq!(monster.position, before.position);
        assert_eq!(monster.last_attack_at_ms, 0);
        assert!(!monster.is_attacking);
    }
    assert_eq!(fx.count("characterDamaged"), 0);

    fx.step(100);
    assert_eq!(fx.sim.get_monster_by_id(id).unwrap().last_attack_at_ms, 2400);
    assert_eq!(fx.count("characterDamaged"), 1);
}

#[test]
fn hit_flash_clears_before_stun_ends() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    fx.sim.apply_damage_to_monster(id, 10, CharacterId(1)).unwrap();
    assert!(fx.sim.get_monster_by_id(id).unwrap().is_hit);

    fx.step(300);
    let monster = fx.sim.get_monster_by_id(id).unwrap();
    assert!(!monster.is_hit);
    assert!(monster.is_stunned(fx.clock.now_ms()));
}

#[test]
fn death_pays_out_exactly_once() {
    let config = SimConfig {
        dungeon_level: 3,
        dungeon_multiplier: 1.0,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(get_monster_templates(), config);
    fx.add_character(7, Position::new(100.0, 300.0), CombatStats::default());

    let id = fx.sim.spawn_monster("slime", 2, Position::new(800.0, 300.0)).unwrap();
    let health = fx.sim.get_monster_by_id(id).unwrap().health;
    let defense = fx.sim.get_monster_by_id(id).unwrap().defense;

    let outcome = fx
        .sim
        .apply_damage_to_monster(id, health + defense, CharacterId(7))
        .unwrap();
    assert_eq!(outcome.remaining_health, 0);
    assert!(outcome.killed);
    let payout = outcome.payout.unwrap();
    assert_eq!(payout.currency, 6);
    assert_eq!(payout.experience, 10);

    // Corpse hits are rejected
    let err = fx.sim.apply_damage_to_monster(id, 50, CharacterId(7)).unwrap_err();
    assert_eq!(err, SimError::EntityDead(id));

    for _ in 0..5 {
        fx.step(50);
    }

    assert_eq!(fx.count("monsterKilled"), 1);
    let host = fx.host.borrow();
    assert_eq!(host.currency, 6);
    assert_eq!(host.character(CharacterId(7)).unwrap().experience, 10);
}

#[test]
fn killed_event_carries_attribution() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("bone_dragon", 2, Position::new(900.0, 300.0)).unwrap();
    fx.sim.apply_damage_to_monster(id, u32::MAX, CharacterId(3)).unwrap();

    let host = fx.host.borrow();
    let killed = host.events_named("monsterKilled");
    match killed.as_slice() {
        [SimEvent::MonsterKilled { monster_id, archetype_id, is_boss, level, source_character_id }] => {
            assert_eq!(*monster_id, id);
            assert_eq!(archetype_id, "bone_dragon");
            assert!(*is_boss);
            assert_eq!(*level, 2);
            assert_eq!(*source_character_id, CharacterId(3));
        }
        other => panic!("unexpected events: {:?}", other),
    }
    // Chance 2.0 is a guaranteed drop
    assert!(host.item_count("dragon_bone") >= 1);
}

#[test]
fn dead_monster_lingers_then_despawns() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    fx.sim.apply_damage_to_monster(id, 10_000, CharacterId(1)).unwrap();
    assert_eq!(fx.sim.get_active_count(), 0);

    fx.step(100);
    assert!(fx.sim.get_monster_by_id(id).is_some());
    assert!(fx.host.borrow().render_states[&id].is_dead);

    fx.step(500);
    assert!(fx.sim.get_monster_by_id(id).is_none());

    let host = fx.host.borrow();
    assert_eq!(host.removed, vec![id]);
    assert!(host.events.contains(&SimEvent::MonsterDespawned {
        monster_id: id,
        reason: DespawnReason::Killed,
    }));
}

#[test]
fn zero_linger_purges_on_next_tick() {
    let config = SimConfig {
        death_linger_ms: 0,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(get_monster_templates(), config);
    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    fx.sim.apply_damage_to_monster(id, 10_000, CharacterId(1)).unwrap();

    fx.step(16);
    assert!(fx.sim.get_monster_by_id(id).is_none());
    assert_eq!(fx.sim.directory().len(), 0);
}

#[test]
fn monsters_scroll_off_screen_and_despawn() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("slime", 1, Position::new(20.0, 300.0)).unwrap();

    for _ in 0..20 {
        fx.step(1000);
    }

    assert!(fx.sim.get_monster_by_id(id).is_none());
    let host = fx.host.borrow();
    assert_eq!(host.removed, vec![id]);
    assert!(host.events.contains(&SimEvent::MonsterDespawned {
        monster_id: id,
        reason: DespawnReason::OffScreen,
    }));
    // Off-screen culling pays nothing
    assert_eq!(host.currency, 0);
    assert!(host.events_named("monsterKilled").is_empty());
}

#[test]
fn wandering_without_characters() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("slime", 1, Position::new(1000.0, 300.0)).unwrap();

    // Spawns idle and drifts with the scroll
    fx.step(500);
    let monster = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(monster.movement_state, MovementState::Idle);
    assert!((monster.position.x - 970.0).abs() < 1e-3);
    assert_eq!(monster.position.y, 300.0);

    // Toggle period elapses
    fx.step(2500);
    fx.step(500);
    let monster = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(monster.movement_state, MovementState::Moving);
    assert!(monster.position.y != 300.0);
    assert!((monster.position.y - 300.0).abs() <= monster.vertical_range / 2.0 + 1e-3);
}

#[test]
fn approach_range_stops_without_attacking() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(100.0, 300.0), CombatStats::default());
    let id = fx.sim.spawn_monster("slime", 1, Position::new(300.0, 300.0)).unwrap();

    for _ in 0..60 {
        fx.step(100);
    }

    let monster = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(monster.movement_state, MovementState::Stopped);
    assert_eq!(monster.position, Position::new(300.0, 300.0));
    assert_eq!(fx.count("characterDamaged") + fx.count("monsterMissed"), 0);
}

#[test]
fn health_stays_within_bounds() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(300.0, 300.0), CombatStats::default());
    let mut ids = Vec::new();
    for (i, archetype) in ["slime", "bat", "goblin", "orc_captain"].iter().enumerate() {
        let position = Position::new(320.0 + 40.0 * i as f32, 300.0);
        ids.push(fx.sim.spawn_monster(archetype, 2, position).unwrap());
    }

    for round in 0..200u32 {
        let target = ids[round as usize % ids.len()];
        let _ = fx.sim.apply_damage_to_monster(target, 7 + round % 40, CharacterId(1));
        fx.step(40);

        for monster in fx.sim.directory().iter() {
            assert!(monster.health <= monster.max_health);
            assert_eq!(monster.is_dead, monster.health == 0);
        }
    }
}

#[test]
fn unknown_ids_are_rejected_without_side_effects() {
    let mut fx = Fixture::defaults();
    let ghost = MonsterId(999);

    assert_eq!(
        fx.sim.apply_damage_to_monster(ghost, 10, CharacterId(1)).unwrap_err(),
        SimError::UnknownEntity(ghost)
    );
    assert_eq!(
        fx.sim.apply_effect_to_monster(ghost, EffectKind::AttackBonus, 5.0, 1000).unwrap_err(),
        SimError::UnknownEntity(ghost)
    );
    assert!(fx.sim.get_monster_by_id(ghost).is_none());

    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    fx.clock.set(2000);
    assert_eq!(
        fx.sim.monster_attacks_character(id, CharacterId(42)).unwrap_err(),
        SimError::UnknownCharacter(CharacterId(42))
    );

    fx.step(50);
    assert!(fx.host.borrow().events.iter().all(|e| e.name() == "monsterSpawned"));
}

#[test]
fn defense_effect_applies_then_expires() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    fx.sim
        .apply_effect_to_monster(id, EffectKind::DefenseBonus, 100.0, 1000)
        .unwrap();

    assert_eq!(fx.sim.apply_damage_to_monster(id, 50, CharacterId(1)).unwrap().damage, 1);

    fx.step(1000);
    assert!(fx.sim.get_monster_by_id(id).unwrap().active_effects.is_empty());
    assert_eq!(fx.sim.apply_damage_to_monster(id, 50, CharacterId(1)).unwrap().damage, 48);
}

#[test]
fn expired_effect_stops_counting_before_next_tick() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    fx.sim
        .apply_effect_to_monster(id, EffectKind::DefenseBonus, 100.0, 1000)
        .unwrap();

    // No tick runs, so the effect is still stored but already expired
    fx.clock.set(1500);
    assert_eq!(fx.sim.get_monster_by_id(id).unwrap().active_effects.len(), 1);
    assert_eq!(fx.sim.apply_damage_to_monster(id, 50, CharacterId(1)).unwrap().damage, 48);
}

#[test]
fn expired_attack_bonus_not_used_in_attack() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(250.0, 300.0), CombatStats::default());
    let id = fx.sim.spawn_monster("slime", 1, Position::new(300.0, 300.0)).unwrap();
    fx.sim
        .apply_effect_to_monster(id, EffectKind::AttackBonus, 40.0, 1000)
        .unwrap();

    fx.clock.set(2000);
    let outcome = fx.sim.monster_attacks_character(id, CharacterId(1)).unwrap();
    assert_eq!(outcome.result.damage, 10);
    assert_eq!(outcome.character_health, 490);
}

#[test]
fn stunned_monster_cannot_attack_directly() {
    let mut fx = Fixture::defaults();
    fx.add_character(1, Position::new(250.0, 300.0), CombatStats::default());
    let id = fx.sim.spawn_monster("slime", 1, Position::new(300.0, 300.0)).unwrap();

    // Cooldown is ready, but the hit at 2000 stuns until 2500
    fx.clock.set(2000);
    fx.sim.apply_damage_to_monster(id, 10, CharacterId(1)).unwrap();

    let err = fx.sim.monster_attacks_character(id, CharacterId(1)).unwrap_err();
    assert_eq!(err, SimError::Stunned(id));
    let monster = fx.sim.get_monster_by_id(id).unwrap();
    assert_eq!(monster.last_attack_at_ms, 0);
    assert!(!monster.is_attacking);
    assert_eq!(fx.count("characterDamaged") + fx.count("monsterMissed"), 0);
    assert_eq!(fx.host.borrow().character(CharacterId(1)).unwrap().health, 500);

    fx.clock.set(2500);
    assert!(fx.sim.monster_attacks_character(id, CharacterId(1)).is_ok());
}

#[test]
fn culling_a_monster_does_not_skip_its_neighbours() {
    let mut fx = Fixture::defaults();
    let first = fx.sim.spawn_monster("slime", 1, Position::new(800.0, 300.0)).unwrap();
    let culled = fx.sim.spawn_monster("slime", 1, Position::new(-200.0, 300.0)).unwrap();
    let last = fx.sim.spawn_monster("slime", 1, Position::new(900.0, 300.0)).unwrap();
    let updates_before = fx.host.borrow().render_update_count;

    fx.clock.advance(100);
    let stats = fx.sim.tick(100);

    assert_eq!(stats.removed, 1);
    assert_eq!(stats.updated, 2);
    assert_eq!(stats.errors, 0);
    assert!(fx.sim.get_monster_by_id(culled).is_none());

    // One publish each for the survivors, none for the culled monster
    let host = fx.host.borrow();
    assert_eq!(host.render_update_count, updates_before + 2);
    assert_eq!(host.removed, vec![culled]);
    assert!((host.render_states[&first].position.x - 794.0).abs() < 1e-3);
    assert!((host.render_states[&last].position.x - 894.0).abs() < 1e-3);
}

#[test]
fn purging_a_corpse_does_not_skip_its_neighbours() {
    let mut fx = Fixture::defaults();
    let first = fx.sim.spawn_monster("bat", 1, Position::new(800.0, 300.0)).unwrap();
    let corpse = fx.sim.spawn_monster("slime", 1, Position::new(850.0, 300.0)).unwrap();
    let last = fx.sim.spawn_monster("goblin", 1, Position::new(900.0, 300.0)).unwrap();
    fx.sim.apply_damage_to_monster(corpse, 10_000, CharacterId(1)).unwrap();

    fx.clock.set(600);
    let updates_before = fx.host.borrow().render_update_count;
    let stats = fx.sim.tick(600);

    assert_eq!(stats.removed, 1);
    assert_eq!(stats.updated, 2);
    assert!(fx.sim.get_monster_by_id(corpse).is_none());
    assert!(fx.sim.get_monster_by_id(first).is_some());
    assert!(fx.sim.get_monster_by_id(last).is_some());

    let host = fx.host.borrow();
    assert_eq!(host.render_update_count, updates_before + 2);
    assert!(host.render_states.contains_key(&first));
    assert!(host.render_states.contains_key(&last));
    assert_eq!(host.events_named("monsterKilled").len(), 1);
}

#[test]
fn strict_drops_skip_unknown_items() {
    let config = SimConfig {
        strict_drops: true,
        ..SimConfig::default()
    };
    let table = vec![DropEntry::new("known", 1.0, 2, 2), DropEntry::new("mystery", 1.0, 1, 1)];
    let mut fx = Fixture::new(vec![dummy("chest", 0, 1.0, table)], config);
    fx.host.borrow_mut().known_items = Some(HashSet::from(["known".to_string()]));

    let id = fx.sim.spawn_monster("chest", 1, Position::new(800.0, 300.0)).unwrap();
    let payout = fx
        .sim
        .apply_damage_to_monster(id, 10_000, CharacterId(1))
        .unwrap()
        .payout
        .unwrap();

    assert_eq!(payout.drops.len(), 2);
    let host = fx.host.borrow();
    assert_eq!(host.item_count("known"), 2);
    assert_eq!(host.item_count("mystery"), 0);
}

#[test]
fn full_inventory_does_not_block_rewards() {
    let table = vec![DropEntry::new("a", 1.0, 1, 1)];
    let mut fx = Fixture::new(vec![dummy("chest", 0, 1.0, table)], SimConfig::default());
    fx.add_character(1, Position::new(100.0, 300.0), CombatStats::default());
    fx.host.borrow_mut().inventory_capacity = Some(0);

    let id = fx.sim.spawn_monster("chest", 1, Position::new(800.0, 300.0)).unwrap();
    fx.sim.apply_damage_to_monster(id, 10_000, CharacterId(1)).unwrap();

    let host = fx.host.borrow();
    assert_eq!(host.item_count("a"), 0);
    assert_eq!(host.currency, 2);
    assert_eq!(host.character(CharacterId(1)).unwrap().experience, 5);
    assert_eq!(host.events_named("monsterKilled").len(), 1);
}

#[test]
fn clear_all_removes_everything_without_payout() {
    let mut fx = Fixture::defaults();
    for x in [600.0, 700.0, 800.0] {
        fx.sim.spawn_monster("goblin", 1, Position::new(x, 300.0)).unwrap();
    }

    fx.sim.clear_all();

    assert_eq!(fx.sim.get_active_count(), 0);
    assert!(fx.sim.directory().is_empty());
    let host = fx.host.borrow();
    assert_eq!(host.removed.len(), 3);
    assert_eq!(host.events_named("monsterDespawned").len(), 3);
    assert!(host.events_named("monsterKilled").is_empty());
    assert_eq!(host.currency, 0);
}

#[test]
fn tick_publishes_render_state() {
    let mut fx = Fixture::defaults();
    let id = fx.sim.spawn_monster("bat", 2, Position::new(800.0, 300.0)).unwrap();

    fx.step(100);

    let host = fx.host.borrow();
    let render = &host.render_states[&id];
    assert_eq!(render.archetype_id, "bat");
    assert_eq!(render.health_fraction, 1.0);
    assert!(!render.is_dead);
    assert!(host.render_update_count >= 2);
}
