//! Simulation tuning loaded at startup.
//!
//! Every field has a default, so a config file only needs to list the
//! values it overrides.

use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Melee range in world units
pub const DEFAULT_ATTACK_RANGE: f32 = 100.0;

/// Detection range in world units (stop and face, no attack)
pub const DEFAULT_APPROACH_RANGE: f32 = 250.0;

/// Horizontal world scroll in units per second
pub const DEFAULT_WORLD_SCROLL_SPEED: f32 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub attack_range: f32,
    pub approach_range: f32,
    pub world_scroll_speed: f32,
    /// Entities whose right edge is left of this x are culled
    pub visible_min_x: f32,
    /// How long the hit sprite stays up after a hit
    pub hit_flash_ms: u64,
    /// How long the attack sprite stays up after an attack
    pub attack_anim_ms: u64,
    /// Period of the idle/moving wander toggle
    pub wander_toggle_ms: u64,
    /// Dead entities stay this long for the death animation (0 purges on the next tick)
    pub death_linger_ms: u64,
    pub default_vertical_range: f32,
    pub base_copper: f64,
    pub dungeon_level: u32,
    pub dungeon_multiplier: f64,
    /// Skip drops whose item id the catalog does not know
    pub strict_drops: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            attack_range: DEFAULT_ATTACK_RANGE,
            approach_range: DEFAULT_APPROACH_RANGE,
            world_scroll_speed: DEFAULT_WORLD_SCROLL_SPEED,
            visible_min_x: 0.0,
            hit_flash_ms: 300,
            attack_anim_ms: 2000,
            wander_toggle_ms: 3000,
            death_linger_ms: 600,
            default_vertical_range: 80.0,
            base_copper: 2.0,
            dungeon_level: 1,
            dungeon_multiplier: 1.0,
            strict_drops: false,
        }
    }
}

impl SimConfig {
    /// Load config from a JSON file
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        let config = Self::from_json_str(&content)
            .map_err(|e| SimError::Config(format!("Failed to parse {:?}: {}", path, e)))?;

        info!("Loaded simulation config from {:?}", path);
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Copper granted for one kill: round(base_copper * dungeon_level * dungeon_multiplier)
    pub fn currency_reward(&self) -> u64 {
        let reward = self.base_copper * self.dungeon_level as f64 * self.dungeon_multiplier;
        reward.round().max(0.0) as u64
    }
}
