//! Hit, crit and damage resolution for a single attack.

use rand::Rng;
use super::roll_chance as roll;
use horde_shared::CombatStats;

/// Damage multiplier on a critical hit
pub const CRIT_MULTIPLIER: f32 = 2.0;

/// Outcome of one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    pub damage: u32,
    pub is_crit: bool,
    pub is_miss: bool,
}

impl AttackResult {
    pub fn miss() -> Self {
        Self {
            damage: 0,
            is_crit: false,
            is_miss: true,
        }
    }
}

/// Resolve an attack: evasion roll, then crit roll, then defense.
///
/// A landed hit always deals at least 1 so high defense never makes a
/// target unkillable.
pub fn resolve_attack(
    attacker: &CombatStats,
    defender: &CombatStats,
    base_damage: u32,
    rng: &mut impl Rng,
) -> AttackResult {
    if roll(defender.evasion, rng) {
        return AttackResult::miss();
    }

    let is_crit = roll(attacker.crit_chance, rng);
    let raw = if is_crit {
        (base_damage as f32 * CRIT_MULTIPLIER).round() as u32
    } else {
        base_damage
    };

    AttackResult {
        damage: mitigate(raw, defender.defense),
        is_crit,
        is_miss: false,
    }
}

/// Defense-adjusted damage with a floor of 1
pub fn mitigate(raw_damage: u32, defense: u32) -> u32 {
    raw_damage.saturating_sub(defense).max(1)
}
