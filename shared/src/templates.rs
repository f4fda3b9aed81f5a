//! Monster archetype definitions shared between the simulation and hosts.

use serde::{Deserialize, Serialize};

/// Default attack cooldown in milliseconds
pub const DEFAULT_ATTACK_COOLDOWN_MS: u64 = 2000;

/// Default post-hit stun in milliseconds
pub const DEFAULT_STUN_DURATION_MS: u64 = 500;

/// Monster tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MonsterTier {
    #[default]
    Basic,
    Elite,
    Boss,
}

/// Opaque sprite identifiers, passed through to the renderer untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpriteRefs {
    pub idle: String,
    pub hit: String,
    pub attack_hit: String,
}

/// Drop table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub item_id: String,
    /// Rolled independently; >= 1.0 always drops, <= 0.0 never drops
    pub chance: f64,
    /// Inclusive [min, max]
    pub quantity_range: [u32; 2],
}

impl DropEntry {
    pub fn new(item_id: impl Into<String>, chance: f64, min: u32, max: u32) -> Self {
        Self {
            item_id: item_id.into(),
            chance,
            quantity_range: [min, max],
        }
    }
}

/// Monster archetype definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub archetype_id: String,
    #[serde(default)]
    pub tier: MonsterTier,
    pub base_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_experience: u64,
    /// Vertical wander rate in units per second
    pub base_speed: f32,
    #[serde(default)]
    pub sprite_refs: SpriteRefs,
    pub frame_count: u32,
    pub frame_duration_ms: u64,
    pub width: f32,
    pub height: f32,
    pub drop_rate: f64,
    #[serde(default)]
    pub drop_table: Vec<DropEntry>,
    #[serde(default = "default_attack_cooldown_ms")]
    pub attack_cooldown_ms: u64,
    #[serde(default = "default_stun_duration_ms")]
    pub stun_duration_ms: u64,
    /// Falls back to the simulation's configured default when absent
    #[serde(default)]
    pub vertical_range: Option<f32>,
    /// Chance for this monster's attacks to crit; 0 when absent
    #[serde(default)]
    pub crit_chance: f64,
}

fn default_attack_cooldown_ms() -> u64 {
    DEFAULT_ATTACK_COOLDOWN_MS
}

fn default_stun_duration_ms() -> u64 {
    DEFAULT_STUN_DURATION_MS
}

impl MonsterTemplate {
    pub fn is_boss(&self) -> bool {
        self.tier == MonsterTier::Boss
    }
}

fn sprites(name: &str) -> SpriteRefs {
    SpriteRefs {
        idle: format!("monsters/{}/idle", name),
        hit: format!("monsters/{}/hit", name),
        attack_hit: format!("monsters/{}/attack", name),
    }
}

/// Built-in monster catalog for the prototype
pub fn get_monster_templates() -> Vec<MonsterTemplate> {
    vec![
        MonsterTemplate {
            archetype_id: "slime".into(),
            tier: MonsterTier::Basic,
            base_health: 250,
            base_attack: 10,
            base_defense: 2,
            base_experience: 5,
            base_speed: 20.0,
            sprite_refs: sprites("slime"),
            frame_count: 4,
            frame_duration_ms: 150,
            width: 64.0,
            height: 48.0,
            drop_rate: 0.5,
            drop_table: vec![
                DropEntry::new("slime_gel", 0.8, 1, 3),
                DropEntry::new("health_potion", 0.1, 1, 1),
            ],
            attack_cooldown_ms: DEFAULT_ATTACK_COOLDOWN_MS,
            stun_duration_ms: DEFAULT_STUN_DURATION_MS,
            vertical_range: None,
            crit_chance: 0.0,
        },
        MonsterTemplate {
            archetype_id: "bat".into(),
            tier: MonsterTier::Basic,
            base_health: 120,
            base_attack: 14,
            base_defense: 0,
            base_experience: 4,
            base_speed: 45.0,
            sprite_refs: sprites("bat"),
            frame_count: 6,
            frame_duration_ms: 80,
            width: 48.0,
            height: 32.0,
            drop_rate: 0.35,
            drop_table: vec![
                DropEntry::new("bat_wing", 0.7, 1, 2),
                DropEntry::new("copper_ore", 0.15, 1, 2),
            ],
            attack_cooldown_ms: 1500,
            stun_duration_ms: DEFAULT_STUN_DURATION_MS,
            vertical_range: Some(140.0),
            crit_chance: 0.0,
        },
        MonsterTemplate {
            archetype_id: "goblin".into(),
            tier: MonsterTier::Basic,
            base_health: 300,
            base_attack: 16,
            base_defense: 5,
            base_experience: 8,
            base_speed: 25.0,
            sprite_refs: sprites("goblin"),
            frame_count: 4,
            frame_duration_ms: 120,
            width: 72.0,
            height: 80.0,
            drop_rate: 0.6,
            drop_table: vec![
                DropEntry::new("goblin_ear", 0.5, 1, 1),
                DropEntry::new("copper_ore", 0.25, 1, 3),
                DropEntry::new("iron_dagger", 0.03, 1, 1),
            ],
            attack_cooldown_ms: DEFAULT_ATTACK_COOLDOWN_MS,
            stun_duration_ms: DEFAULT_STUN_DURATION_MS,
            vertical_range: None,
            crit_chance: 0.1,
        },
        MonsterTemplate {
            archetype_id: "orc_captain".into(),
            tier: MonsterTier::Elite,
            base_health: 900,
            base_attack: 28,
            base_defense: 12,
            base_experience: 30,
            base_speed: 15.0,
            sprite_refs: sprites("orc_captain"),
            frame_count: 4,
            frame_duration_ms: 160,
            width: 96.0,
            height: 112.0,
            drop_rate: 0.9,
            drop_table: vec![
                DropEntry::new("iron_ore", 0.6, 2, 4),
                DropEntry::new("orc_tusk", 0.4, 1, 1),
                DropEntry::new("steel_axe", 0.05, 1, 1),
            ],
            attack_cooldown_ms: 2500,
            stun_duration_ms: 300,
            vertical_range: Some(40.0),
            crit_chance: 0.15,
        },
        MonsterTemplate {
            archetype_id: "bone_dragon".into(),
            tier: MonsterTier::Boss,
            base_health: 5000,
            base_attack: 60,
            base_defense: 25,
            base_experience: 250,
            base_speed: 10.0,
            sprite_refs: sprites("bone_dragon"),
            frame_count: 8,
            frame_duration_ms: 100,
            width: 220.0,
            height: 180.0,
            drop_rate: 1.0,
            drop_table: vec![
                DropEntry::new("dragon_bone", 2.0, 2, 5),
                DropEntry::new("dragon_scale", 0.5, 1, 2),
                DropEntry::new("ancient_relic", 0.05, 1, 1),
            ],
            attack_cooldown_ms: 3000,
            stun_duration_ms: 200,
            vertical_range: Some(30.0),
            crit_chance: 0.2,
        },
    ]
}
