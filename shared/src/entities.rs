//! Shared entity definitions.

use serde::{Deserialize, Serialize};

/// Identifier of a spawned monster, stable for the entity's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u64);

/// Identifier of a player-controlled character, owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u64);

impl std::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "monster#{}", self.0)
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// 2D world position (x grows to the right, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Horizontal facing used by the renderer to flip sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// Facing from `from_x` toward `to_x`; ties keep facing left (toward the scroll)
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Stat block used on both sides of an attack.
///
/// Optional stats like crit chance and evasion are resolved to 0 when the
/// block is built, so combat code never has to check for their absence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
    /// Probability in [0, 1]
    #[serde(default)]
    pub crit_chance: f64,
    /// Probability in [0, 1]
    #[serde(default)]
    pub evasion: f64,
}

impl CombatStats {
    pub fn new(attack: u32, defense: u32) -> Self {
        Self {
            attack,
            defense,
            crit_chance: 0.0,
            evasion: 0.0,
        }
    }

    pub fn with_crit_chance(mut self, crit_chance: f64) -> Self {
        self.crit_chance = crit_chance;
        self
    }

    pub fn with_evasion(mut self, evasion: f64) -> Self {
        self.evasion = evasion;
        self
    }
}

/// Movement half of the monster state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Moving,
    Stopped,
}

/// Combat half of the monster state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CombatState {
    #[default]
    Neutral,
    Hit,
    Attacking,
    Dead,
}

/// Which sprite sheet the renderer should show (hit > attacking > idle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpriteSelector {
    #[default]
    Idle,
    Hit,
    AttackHit,
}
