//! In-memory host used by the harness binary and by tests.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use horde_shared::{CharacterId, CombatStats, MonsterId, Position, RenderState, SimEvent};

use super::{
    CharacterDirectory, CharacterRef, EventBus, Inventory, ItemCatalog, PresentationSink,
    RewardSink,
};

/// Player character state held by the in-memory host
#[derive(Debug, Clone)]
pub struct MemoryCharacter {
    pub id: CharacterId,
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    pub max_health: u32,
    pub experience: u64,
    pub stats: CombatStats,
}

impl MemoryCharacter {
    pub fn new(id: u64, position: Position, health: u32, stats: CombatStats) -> Self {
        Self {
            id: CharacterId(id),
            position,
            width: 48.0,
            height: 96.0,
            health,
            max_health: health,
            experience: 0,
            stats,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    fn to_ref(&self) -> CharacterRef {
        CharacterRef {
            id: self.id,
            position: self.position,
            width: self.width,
            height: self.height,
            health: self.health,
            stats: self.stats,
        }
    }
}

/// Records every call the simulation makes into the host
#[derive(Debug, Default)]
pub struct MemoryHost {
    characters: BTreeMap<CharacterId, MemoryCharacter>,
    /// item id -> quantity
    pub inventory: HashMap<String, u32>,
    /// Max distinct item ids; None means unbounded
    pub inventory_capacity: Option<usize>,
    /// Known item ids; None means every id exists
    pub known_items: Option<HashSet<String>>,
    pub currency: u64,
    pub events: Vec<SimEvent>,
    /// Latest render state per monster
    pub render_states: HashMap<MonsterId, RenderState>,
    pub render_update_count: u64,
    pub removed: Vec<MonsterId>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_character(&mut self, character: MemoryCharacter) {
        self.characters.insert(character.id, character);
    }

    pub fn character(&self, id: CharacterId) -> Option<&MemoryCharacter> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut MemoryCharacter> {
        self.characters.get_mut(&id)
    }

    pub fn remove_character(&mut self, id: CharacterId) -> Option<MemoryCharacter> {
        self.characters.remove(&id)
    }

    pub fn item_count(&self, item_id: &str) -> u32 {
        self.inventory.get(item_id).copied().unwrap_or(0)
    }

    /// Events with the given name, e.g. "monsterKilled"
    pub fn events_named(&self, name: &str) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.name() == name).collect()
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn into_shared(self) -> SharedHost {
        SharedHost(Rc::new(RefCell::new(self)))
    }
}

/// Cloneable handle to a [`MemoryHost`]; each clone can be boxed as a different port
#[derive(Debug, Clone, Default)]
pub struct SharedHost(Rc<RefCell<MemoryHost>>);

impl SharedHost {
    pub fn new() -> Self {
        MemoryHost::new().into_shared()
    }

    pub fn borrow(&self) -> Ref<'_, MemoryHost> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, MemoryHost> {
        self.0.borrow_mut()
    }
}

impl CharacterDirectory for SharedHost {
    fn nearest(&self, position: Position) -> Option<CharacterRef> {
        let host = self.0.borrow();
        let mut closest: Option<(&MemoryCharacter, f32)> = None;
        for character in host.characters.values() {
            if character.is_dead() {
                continue;
            }
            let dist = position.distance_to(character.position);
            match closest {
                Some((_, best)) if best <= dist => {}
                _ => closest = Some((character, dist)),
            }
        }
        closest.map(|(c, _)| c.to_ref())
    }

    fn get(&self, id: CharacterId) -> Option<CharacterRef> {
        self.0.borrow().characters.get(&id).map(MemoryCharacter::to_ref)
    }

    fn damage(&mut self, id: CharacterId, amount: u32) -> Option<u32> {
        let mut host = self.0.borrow_mut();
        let character = host.characters.get_mut(&id)?;
        character.health = character.health.saturating_sub(amount);
        Some(character.health)
    }

    fn award_experience(&mut self, id: CharacterId, amount: u64) -> bool {
        let mut host = self.0.borrow_mut();
        match host.characters.get_mut(&id) {
            Some(character) => {
                character.experience += amount;
                true
            }
            None => false,
        }
    }
}

impl Inventory for SharedHost {
    fn add_item(&mut self, item_id: &str, quantity: u32) -> bool {
        let mut host = self.0.borrow_mut();
        let is_new = !host.inventory.contains_key(item_id);
        if let Some(capacity) = host.inventory_capacity {
            if is_new && host.inventory.len() >= capacity {
                return false;
            }
        }
        *host.inventory.entry(item_id.to_string()).or_insert(0) += quantity;
        true
    }
}

impl ItemCatalog for SharedHost {
    fn exists(&self, item_id: &str) -> bool {
        match &self.0.borrow().known_items {
            Some(known) => known.contains(item_id),
            None => true,
        }
    }
}

impl RewardSink for SharedHost {
    fn add_currency(&mut self, amount: u64) {
        self.0.borrow_mut().currency += amount;
    }
}

impl PresentationSink for SharedHost {
    fn on_entity_updated(&mut self, monster_id: MonsterId, state: &RenderState) {
        let mut host = self.0.borrow_mut();
        host.render_states.insert(monster_id, state.clone());
        host.render_update_count += 1;
    }

    fn on_entity_removed(&mut self, monster_id: MonsterId) {
        let mut host = self.0.borrow_mut();
        host.render_states.remove(&monster_id);
        host.removed.push(monster_id);
    }
}

impl EventBus for SharedHost {
    fn dispatch(&mut self, event: SimEvent) {
        self.0.borrow_mut().events.push(event);
    }
}
