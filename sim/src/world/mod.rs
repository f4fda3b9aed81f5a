//! Monster simulation world.
//!
//! [`SimulationScheduler`] is the single writer for every monster. The host
//! calls [`SimulationScheduler::tick`] once per frame and routes player hits
//! through [`SimulationScheduler::apply_damage_to_monster`]; nothing else
//! mutates monster state.

mod registry;
mod spawner;

pub use registry::MonsterTemplateRegistry;
pub use spawner::{SpawnEntry, SpawnRequest, WaveConfig, WaveSpawner};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use horde_shared::{CharacterId, DespawnReason, MonsterId, Position, SimEvent};

use crate::clock::Clock;
use crate::combat::resolver::mitigate;
use crate::combat::{resolve_attack, resolve_loot, AttackResult, LootDrop};
use crate::config::SimConfig;
use crate::entities::{ActiveEffect, EffectKind, MonsterDirectory, MonsterEntity};
use crate::error::SimError;
use crate::host::Collaborators;

/// Everything granted when a monster dies
#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    pub source_character_id: CharacterId,
    pub drops: Vec<LootDrop>,
    pub experience: u64,
    pub currency: u64,
}

/// Result of a hit on a monster
#[derive(Debug, Clone, PartialEq)]
pub struct DamageOutcome {
    /// Damage after defense (at least 1)
    pub damage: u32,
    pub remaining_health: u32,
    pub killed: bool,
    /// Present only on the hit that killed
    pub payout: Option<Payout>,
}

/// Result of a monster attacking a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    pub monster_id: MonsterId,
    pub character_id: CharacterId,
    pub result: AttackResult,
    /// Character health after the attack
    pub character_health: u32,
}

/// Per-tick counters, mostly for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub updated: usize,
    pub attacks: usize,
    pub removed: usize,
    pub errors: usize,
}

/// What happened to one monster during a tick
enum Step {
    Updated { attacked: bool },
    Remove(DespawnReason),
}

pub struct SimulationScheduler {
    directory: MonsterDirectory,
    config: SimConfig,
    clock: Box<dyn Clock>,
    rng: StdRng,
    host: Collaborators,
}

impl SimulationScheduler {
    pub fn new(
        registry: MonsterTemplateRegistry,
        config: SimConfig,
        clock: Box<dyn Clock>,
        host: Collaborators,
    ) -> Self {
        Self::with_rng(registry, config, clock, host, StdRng::from_entropy())
    }

    /// Same as [`new`](Self::new) with a fixed RNG seed
    pub fn with_seed(
        registry: MonsterTemplateRegistry,
        config: SimConfig,
        clock: Box<dyn Clock>,
        host: Collaborators,
        seed: u64,
    ) -> Self {
        Self::with_rng(registry, config, clock, host, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        registry: MonsterTemplateRegistry,
        config: SimConfig,
        clock: Box<dyn Clock>,
        host: Collaborators,
        rng: StdRng,
    ) -> Self {
        let directory = MonsterDirectory::new(registry, config.default_vertical_range);
        Self {
            directory,
            config,
            clock,
            rng,
            host,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn directory(&self) -> &MonsterDirectory {
        &self.directory
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Spawn a monster and announce it
    pub fn spawn_monster(
        &mut self,
        archetype_id: &str,
        level: u32,
        position: Position,
    ) -> Result<MonsterId, SimError> {
        let now = self.clock.now_ms();
        let monster = self.directory.spawn(archetype_id, level, position, now, &mut self.rng)?;

        let id = monster.id;
        let event = SimEvent::MonsterSpawned {
            monster_id: id,
            archetype_id: monster.archetype_id.clone(),
            level: monster.level,
            position: monster.position,
            health: monster.health,
            max_health: monster.max_health,
        };
        let render = monster.render_state();

        self.host.events.dispatch(event);
        self.host.presentation.on_entity_updated(id, &render);
        Ok(id)
    }

    /// Snapshot of a monster's current state
    pub fn get_monster_by_id(&self, id: MonsterId) -> Option<MonsterEntity> {
        self.directory.get(id).cloned()
    }

    /// Monsters that are still alive (dying monsters in their linger window are excluded)
    pub fn get_active_count(&self) -> usize {
        self.directory.iter().filter(|m| !m.is_dead).count()
    }

    /// Drop every monster without payouts
    pub fn clear_all(&mut self) {
        let ids = self.directory.clear();
        for id in &ids {
            self.host.presentation.on_entity_removed(*id);
            self.host.events.dispatch(SimEvent::MonsterDespawned {
                monster_id: *id,
                reason: DespawnReason::Cleared,
            });
        }
        info!("Cleared {} monsters", ids.len());
    }

    /// Attach a timed modifier to a monster
    pub fn apply_effect_to_monster(
        &mut self,
        id: MonsterId,
        kind: EffectKind,
        value: f32,
        duration_ms: u64,
    ) -> Result<(), SimError> {
        let now = self.clock.now_ms();
        let monster = self.live_monster_mut(id)?;
        monster.active_effects.push(ActiveEffect {
            kind,
            value,
            started_at_ms: now,
            duration_ms,
        });
        Ok(())
    }

    /// Player hit on a monster. Defense is applied here with a floor of 1.
    ///
    /// The killing hit runs the death sequence immediately; later hits on
    /// the corpse return [`SimError::EntityDead`].
    pub fn apply_damage_to_monster(
        &mut self,
        id: MonsterId,
        raw_damage: u32,
        source_character_id: CharacterId,
    ) -> Result<DamageOutcome, SimError> {
        let now = self.clock.now_ms();
        let monster = self.live_monster_mut(id)?;

        let damage = mitigate(raw_damage, monster.effective_defense(now));
        let remaining_health = monster.take_damage(damage, source_character_id, now);

        self.host.events.dispatch(SimEvent::MonsterDamaged {
            monster_id: id,
            source_character_id,
            damage,
            remaining_health,
        });

        let payout = if remaining_health == 0 {
            Some(self.kill(id, source_character_id, now)?)
        } else {
            None
        };

        Ok(DamageOutcome {
            damage,
            remaining_health,
            killed: payout.is_some(),
            payout,
        })
    }

    /// Monster attacks a character. The scheduler calls this when the cooldown
    /// has elapsed and the monster is not stunned; both gates are checked
    /// again here so no path can attack twice or attack out of a stun.
    pub fn monster_attacks_character(
        &mut self,
        monster_id: MonsterId,
        character_id: CharacterId,
    ) -> Result<AttackOutcome, SimError> {
        let now = self.clock.now_ms();

        let monster = self.live_monster_mut(monster_id)?;
        if monster.is_stunned(now) {
            return Err(SimError::Stunned(monster_id));
        }
        if !monster.attack_ready(now) {
            return Err(SimError::AttackOnCooldown(monster_id));
        }
        let attacker = monster.combat_stats(now);

        let character = self
            .host
            .characters
            .get(character_id)
            .ok_or(SimError::UnknownCharacter(character_id))?;

        let result = resolve_attack(&attacker, &character.stats, attacker.attack, &mut self.rng);

        if let Some(monster) = self.directory.get_mut(monster_id) {
            monster.begin_attack(now);
        }

        let character_health = if result.is_miss {
            self.host.events.dispatch(SimEvent::MonsterMissed {
                monster_id,
                character_id,
            });
            character.health
        } else {
            let health = self
                .host
                .characters
                .damage(character_id, result.damage)
                .ok_or(SimError::UnknownCharacter(character_id))?;
            self.host.events.dispatch(SimEvent::CharacterDamaged {
                monster_id,
                character_id,
                damage: result.damage,
                is_critical: result.is_crit,
                remaining_health: health,
            });
            health
        };

        Ok(AttackOutcome {
            monster_id,
            character_id,
            result,
            character_health,
        })
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance every monster by one frame.
    ///
    /// Ids are snapshotted up front and removals are applied after the pass,
    /// so despawns never skip or double-process a neighbour. A failing
    /// monster is logged and skipped; the rest of the tick carries on.
    pub fn tick(&mut self, delta_ms: u64) -> TickStats {
        let now = self.clock.now_ms();
        let mut stats = TickStats::default();
        let mut removals = Vec::new();

        for id in self.directory.ids() {
            match self.update_monster(id, delta_ms, now) {
                Ok(Step::Updated { attacked }) => {
                    stats.updated += 1;
                    if attacked {
                        stats.attacks += 1;
                    }
                }
                Ok(Step::Remove(reason)) => removals.push((id, reason)),
                Err(e) => {
                    stats.errors += 1;
                    warn!("Skipping {} this tick: {}", id, e);
                }
            }
        }

        for (id, reason) in removals {
            if self.despawn(id, reason) {
                stats.removed += 1;
            }
        }

        stats
    }

    fn update_monster(&mut self, id: MonsterId, delta_ms: u64, now: u64) -> Result<Step, SimError> {
        let attack_range = self.config.attack_range;
        let approach_range = self.config.approach_range;
        let scroll_speed = self.config.world_scroll_speed;
        let toggle_ms = self.config.wander_toggle_ms;

        let monster = self
            .directory
            .get_mut(id)
            .ok_or(SimError::UnknownEntity(id))?;

        // Dead monsters only play out their death animation
        if monster.is_dead {
            let died_at = monster.died_at_ms.unwrap_or(now);
            if now.saturating_sub(died_at) >= self.config.death_linger_ms {
                return Ok(Step::Remove(DespawnReason::Killed));
            }
            monster.advance_animation(now);
            let render = monster.render_state();
            self.host.presentation.on_entity_updated(id, &render);
            return Ok(Step::Updated { attacked: false });
        }

        if monster.is_off_screen(self.config.visible_min_x) {
            return Ok(Step::Remove(DespawnReason::OffScreen));
        }

        monster.advance_animation(now);
        monster.expire_hit_flash(now, self.config.hit_flash_ms);
        monster.expire_attack(now, self.config.attack_anim_ms);

        let mut attack_target = None;
        if !monster.is_stunned(now) {
            match self.host.characters.nearest(monster.position) {
                None => monster.wander(delta_ms, now, scroll_speed, toggle_ms),
                Some(target) => {
                    let distance = monster.position.distance_to(target.position);
                    if distance <= attack_range {
                        monster.stop_and_face(target.position.x);
                        if monster.attack_ready(now) {
                            attack_target = Some(target.id);
                        }
                    } else if distance <= approach_range {
                        // Stop and face only; monsters never chase
                        monster.stop_and_face(target.position.x);
                    } else {
                        monster.wander(delta_ms, now, scroll_speed, toggle_ms);
                    }
                }
            }
        }

        let mut attacked = false;
        if let Some(character_id) = attack_target {
            match self.monster_attacks_character(id, character_id) {
                Ok(_) => attacked = true,
                Err(e) => debug!("{} attack on {} suppressed: {}", id, character_id, e),
            }
        }

        let monster = self
            .directory
            .get_mut(id)
            .ok_or(SimError::UnknownEntity(id))?;
        monster.expire_effects(now);
        monster.health = monster.health.min(monster.max_health);

        let render = monster.render_state();
        self.host.presentation.on_entity_updated(id, &render);

        Ok(Step::Updated { attacked })
    }

    // =========================================================================
    // Death and removal
    // =========================================================================

    /// Death sequence. `mark_dead` flips the flag before any payout so a
    /// monster can only pay out once.
    fn kill(&mut self, id: MonsterId, source: CharacterId, now: u64) -> Result<Payout, SimError> {
        let monster = self
            .directory
            .get_mut(id)
            .ok_or(SimError::UnknownEntity(id))?;
        if !monster.mark_dead(now) {
            return Err(SimError::EntityDead(id));
        }

        let archetype_id = monster.archetype_id.clone();
        let level = monster.level;
        let is_boss = monster.is_boss();
        let experience = monster.experience;

        let drops = match self.directory.registry().get(&archetype_id) {
            Some(template) => resolve_loot(&template.drop_table, template.drop_rate, &mut self.rng),
            None => Vec::new(),
        };

        for drop in &drops {
            if self.config.strict_drops && !self.host.catalog.exists(&drop.item_id) {
                warn!("Dropping unknown item '{}' from {}", drop.item_id, archetype_id);
                continue;
            }
            if !self.host.inventory.add_item(&drop.item_id, drop.quantity) {
                warn!("Inventory rejected {}x {}", drop.quantity, drop.item_id);
            }
        }

        if !self.host.characters.award_experience(source, experience) {
            debug!("No character {} to award {} xp", source, experience);
        }

        let currency = self.config.currency_reward();
        if currency > 0 {
            self.host.rewards.add_currency(currency);
        }

        self.host.events.dispatch(SimEvent::MonsterKilled {
            monster_id: id,
            archetype_id: archetype_id.clone(),
            is_boss,
            level,
            source_character_id: source,
        });

        info!(
            "{} ({} lvl {}) killed by {}: {} drops, {} xp, {} copper",
            id,
            archetype_id,
            level,
            source,
            drops.len(),
            experience,
            currency
        );

        Ok(Payout {
            source_character_id: source,
            drops,
            experience,
            currency,
        })
    }

    /// Remove a monster and notify the host. Returns false if it was already gone.
    fn despawn(&mut self, id: MonsterId, reason: DespawnReason) -> bool {
        if self.directory.remove(id).is_none() {
            return false;
        }
        debug!("Despawned {} ({:?})", id, reason);
        self.host.presentation.on_entity_removed(id);
        self.host.events.dispatch(SimEvent::MonsterDespawned {
            monster_id: id,
            reason,
        });
        true
    }

    fn live_monster_mut(&mut self, id: MonsterId) -> Result<&mut MonsterEntity, SimError> {
        match self.directory.get_mut(id) {
            Some(monster) if monster.is_dead => Err(SimError::EntityDead(id)),
            Some(monster) => Ok(monster),
            None => {
                debug!("Ignoring stale id {}", id);
                Err(SimError::UnknownEntity(id))
            }
        }
    }
}

impl std::fmt::Debug for SimulationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationScheduler")
            .field("monsters", &self.directory.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
