//! Pure combat rules: level scaling, loot rolls and attack resolution.

pub mod loot;
pub mod resolver;
pub mod scaling;

pub use loot::{resolve as resolve_loot, LootDrop};
pub use resolver::{resolve_attack, AttackResult, CRIT_MULTIPLIER};
pub use scaling::{scale, ScaledStats};

use rand::Rng;

/// Chance >= 1 always succeeds and <= 0 never does, without consuming a roll
pub(crate) fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    if chance >= 1.0 {
        true
    } else if chance <= 0.0 || chance.is_nan() {
        false
    } else {
        rng.gen::<f64>() < chance
    }
}
