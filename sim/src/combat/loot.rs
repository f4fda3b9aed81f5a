//! Loot rolls on monster death.
//!
//! One roll against the monster's drop rate gates the whole table. Past
//! that gate every entry is rolled independently, so a single death can
//! pay out several entries.

use log::{debug, warn};
use rand::Rng;
use super::roll_chance as roll;
use horde_shared::DropEntry;

/// One resolved payout line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootDrop {
    pub item_id: String,
    pub quantity: u32,
}

/// Roll a drop table. Output follows table order.
///
/// Entries with `min > max` are skipped with a warning; the rest still resolve.
pub fn resolve(table: &[DropEntry], drop_rate: f64, rng: &mut impl Rng) -> Vec<LootDrop> {
    if !roll(drop_rate, rng) {
        return Vec::new();
    }

    let mut drops = Vec::new();
    for entry in table {
        let [min, max] = entry.quantity_range;
        if min > max {
            warn!(
                "Skipping drop entry '{}': quantity range [{}, {}] is inverted",
                entry.item_id, min, max
            );
            continue;
        }

        if !roll(entry.chance, rng) {
            continue;
        }

        let quantity = rng.gen_range(min..=max);
        if quantity == 0 {
            continue;
        }

        debug!("Dropped {}x {}", quantity, entry.item_id);
        drops.push(LootDrop {
            item_id: entry.item_id.clone(),
            quantity,
        });
    }

    drops
}
