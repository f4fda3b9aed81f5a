//! Error taxonomy for the monster simulation.

use horde_shared::{CharacterId, MonsterId};

/// Errors surfaced by simulation entry points and loaders.
///
/// Per-entity variants are expected during normal play (despawn races,
/// attacks on cooldown) and are never fatal to a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Spawn requested for an archetype not present in the registry
    UnknownArchetype(String),
    /// Stale or invalid monster id
    UnknownEntity(MonsterId),
    /// Character id the host does not know about
    UnknownCharacter(CharacterId),
    /// Operation targeted a monster that already died
    EntityDead(MonsterId),
    /// Attack attempted inside the cooldown window
    AttackOnCooldown(MonsterId),
    /// Attack attempted while the monster is still stunned from a hit
    Stunned(MonsterId),
    InvalidDropTableEntry {
        archetype_id: String,
        item_id: String,
        reason: String,
    },
    DuplicateArchetype(String),
    InvalidTemplate {
        archetype_id: String,
        reason: String,
    },
    /// Config or data file could not be read or parsed
    Config(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownArchetype(id) => write!(f, "unknown archetype '{}'", id),
            Self::UnknownEntity(id) => write!(f, "unknown entity {}", id),
            Self::UnknownCharacter(id) => write!(f, "unknown character {}", id),
            Self::EntityDead(id) => write!(f, "entity {} is dead", id),
            Self::AttackOnCooldown(id) => write!(f, "entity {} attack is on cooldown", id),
            Self::Stunned(id) => write!(f, "entity {} is stunned", id),
            Self::InvalidDropTableEntry { archetype_id, item_id, reason } => write!(
                f,
                "invalid drop entry '{}' in archetype '{}': {}",
                item_id, archetype_id, reason
            ),
            Self::DuplicateArchetype(id) => write!(f, "duplicate archetype '{}'", id),
            Self::InvalidTemplate { archetype_id, reason } => {
                write!(f, "invalid template '{}': {}", archetype_id, reason)
            }
            Self::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}
