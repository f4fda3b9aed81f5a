//! Level-based stat scaling applied once at spawn.

use horde_shared::MonsterTemplate;

/// Footprint growth per level above 1
const SIZE_GROWTH_PER_LEVEL: f32 = 0.05;

/// Instance stats derived from a template and a dungeon level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledStats {
    /// Level actually used (clamped to >= 1)
    pub level: u32,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u64,
    pub size_multiplier: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale a template to `level`. Stats grow linearly; size grows 5% per level.
///
/// Levels below 1 are clamped to 1.
pub fn scale(template: &MonsterTemplate, level: u32) -> ScaledStats {
    let level = level.max(1);
    let size_multiplier = 1.0 + SIZE_GROWTH_PER_LEVEL * (level - 1) as f32;

    ScaledStats {
        level,
        health: template.base_health.saturating_mul(level),
        attack: template.base_attack.saturating_mul(level),
        defense: template.base_defense.saturating_mul(level),
        experience: template.base_experience.saturating_mul(level as u64),
        size_multiplier,
        width: template.width * size_multiplier,
        height: template.height * size_multiplier,
    }
}
