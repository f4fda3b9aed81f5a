//! Owner of every live monster.
//!
//! Other subsystems hold only [`MonsterId`]s. Ids are handed out in
//! increasing order and the map is ordered, so iteration follows spawn order.

use std::collections::BTreeMap;
use log::debug;
use rand::Rng;
use horde_shared::{MonsterId, Position};

use crate::combat::scale;
use crate::error::SimError;
use crate::world::MonsterTemplateRegistry;

use super::MonsterEntity;

#[derive(Debug)]
pub struct MonsterDirectory {
    registry: MonsterTemplateRegistry,
    monsters: BTreeMap<MonsterId, MonsterEntity>,
    next_id: u64,
    default_vertical_range: f32,
}

impl MonsterDirectory {
    pub fn new(registry: MonsterTemplateRegistry, default_vertical_range: f32) -> Self {
        Self {
            registry,
            monsters: BTreeMap::new(),
            next_id: 1,
            default_vertical_range,
        }
    }

    pub fn registry(&self) -> &MonsterTemplateRegistry {
        &self.registry
    }

    /// Spawn a scaled instance of `archetype_id`. All timers start at `now_ms`.
    pub fn spawn(
        &mut self,
        archetype_id: &str,
        level: u32,
        position: Position,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Result<&MonsterEntity, SimError> {
        let template = self
            .registry
            .get(archetype_id)
            .ok_or_else(|| SimError::UnknownArchetype(archetype_id.to_string()))?;

        let stats = scale(template, level);
        let vertical_range = template.vertical_range.unwrap_or(self.default_vertical_range);
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

        let id = MonsterId(self.next_id);
        self.next_id += 1;

        let monster = MonsterEntity::new(id, template, &stats, position, vertical_range, direction, now_ms);
        debug!(
            "Spawned {} ({} lvl {}) at ({:.1}, {:.1})",
            id, archetype_id, stats.level, position.x, position.y
        );

        Ok(self.monsters.entry(id).or_insert(monster))
    }

    pub fn get(&self, id: MonsterId) -> Option<&MonsterEntity> {
        self.monsters.get(&id)
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut MonsterEntity> {
        self.monsters.get_mut(&id)
    }

    /// Remove a monster. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: MonsterId) -> Option<MonsterEntity> {
        self.monsters.remove(&id)
    }

    /// Snapshot of live ids; safe to hold while the directory is mutated
    pub fn ids(&self) -> Vec<MonsterId> {
        self.monsters.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterEntity> {
        self.monsters.values()
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Remove everything, returning the removed ids
    pub fn clear(&mut self) -> Vec<MonsterId> {
        let ids = self.ids();
        self.monsters.clear();
        ids
    }
}
