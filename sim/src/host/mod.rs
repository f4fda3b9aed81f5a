//! Collaborators the simulation calls into.
//!
//! The host game owns characters, inventory, currency and rendering. The
//! simulation only sees them through these traits.

mod memory;

pub use memory::{MemoryCharacter, MemoryHost, SharedHost};

use horde_shared::{CharacterId, CombatStats, MonsterId, Position, RenderState, SimEvent};

/// What the simulation can see of a player character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRef {
    pub id: CharacterId,
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    /// Defense and evasion are read when a monster attacks this character
    pub stats: CombatStats,
}

// Port for querying and damaging player characters.
pub trait CharacterDirectory {
    /// Closest living character to `position`
    fn nearest(&self, position: Position) -> Option<CharacterRef>;
    fn get(&self, id: CharacterId) -> Option<CharacterRef>;
    /// Returns the character's new health, or None if the id is unknown
    fn damage(&mut self, id: CharacterId, amount: u32) -> Option<u32>;
    /// Returns false if the id is unknown
    fn award_experience(&mut self, id: CharacterId, amount: u64) -> bool;
}

// Port for loot delivery.
pub trait Inventory {
    fn add_item(&mut self, item_id: &str, quantity: u32) -> bool;
}

// Port for validating drop table item ids.
pub trait ItemCatalog {
    fn exists(&self, item_id: &str) -> bool;
}

// Port for currency rewards.
pub trait RewardSink {
    fn add_currency(&mut self, amount: u64);
}

// Port for the renderer. Fire and forget.
pub trait PresentationSink {
    fn on_entity_updated(&mut self, monster_id: MonsterId, state: &RenderState);
    fn on_entity_removed(&mut self, monster_id: MonsterId);
}

// Port for the generic notification bus (missions, UI).
pub trait EventBus {
    fn dispatch(&mut self, event: SimEvent);
}

/// Everything the scheduler talks to outside its own state
pub struct Collaborators {
    pub characters: Box<dyn CharacterDirectory>,
    pub inventory: Box<dyn Inventory>,
    pub catalog: Box<dyn ItemCatalog>,
    pub rewards: Box<dyn RewardSink>,
    pub presentation: Box<dyn PresentationSink>,
    pub events: Box<dyn EventBus>,
}

impl Collaborators {
    /// Route every port to one shared in-memory host
    pub fn from_shared(host: &SharedHost) -> Self {
        Self {
            characters: Box::new(host.clone()),
            inventory: Box::new(host.clone()),
            catalog: Box::new(host.clone()),
            rewards: Box::new(host.clone()),
            presentation: Box::new(host.clone()),
            events: Box::new(host.clone()),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
