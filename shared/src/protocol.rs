//! Event and render-state definitions emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::{CharacterId, Facing, MonsterId, MovementState, Position, SpriteSelector};

/// Simulation tick rate in Hz for hosts that drive a fixed loop
pub const SIM_TICK_RATE: u32 = 20;

// =============================================================================
// Events
// =============================================================================

/// Why a monster left the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DespawnReason {
    Killed,
    OffScreen,
    Cleared,
}

/// One-way notifications for missions, UI and other external systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    MonsterSpawned {
        monster_id: MonsterId,
        archetype_id: String,
        level: u32,
        position: Position,
        health: u32,
        max_health: u32,
    },
    MonsterDamaged {
        monster_id: MonsterId,
        source_character_id: CharacterId,
        damage: u32,
        remaining_health: u32,
    },
    CharacterDamaged {
        monster_id: MonsterId,
        character_id: CharacterId,
        damage: u32,
        is_critical: bool,
        remaining_health: u32,
    },
    MonsterMissed {
        monster_id: MonsterId,
        character_id: CharacterId,
    },
    MonsterKilled {
        monster_id: MonsterId,
        archetype_id: String,
        is_boss: bool,
        level: u32,
        source_character_id: CharacterId,
    },
    MonsterDespawned {
        monster_id: MonsterId,
        reason: DespawnReason,
    },
}

impl SimEvent {
    /// Event name as seen by generic listeners
    pub fn name(&self) -> &'static str {
        match self {
            Self::MonsterSpawned { .. } => "monsterSpawned",
            Self::MonsterDamaged { .. } => "monsterDamaged",
            Self::CharacterDamaged { .. } => "characterDamaged",
            Self::MonsterMissed { .. } => "monsterMissed",
            Self::MonsterKilled { .. } => "monsterKilled",
            Self::MonsterDespawned { .. } => "monsterDespawned",
        }
    }
}

// =============================================================================
// Render state
// =============================================================================

/// Immutable per-frame snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub monster_id: MonsterId,
    pub archetype_id: String,
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub movement_state: MovementState,
    pub current_frame: u32,
    pub sprite: SpriteSelector,
    /// Template sprite id matching `sprite`
    pub sprite_ref: String,
    /// health / max_health in [0, 1]
    pub health_fraction: f32,
    pub is_hit: bool,
    pub is_attacking: bool,
    pub is_dead: bool,
}

// =============================================================================
// Serialization helpers
// =============================================================================

impl SimEvent {
    pub fn serialize(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

impl RenderState {
    pub fn serialize(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}
