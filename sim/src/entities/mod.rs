//! Monster entity definitions and storage.

mod directory;
mod monster;

pub use directory::MonsterDirectory;
pub use monster::{ActiveEffect, EffectKind, MonsterEntity};
