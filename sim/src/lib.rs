//! Horde monster simulation
//!
//! Server-authoritative monster lifecycle for a side-scrolling dungeon:
//! templates and level scaling, the per-tick AI state machine, combat
//! resolution and loot. Rendering, inventory and characters live in the
//! host and are reached through the ports in [`host`].

pub mod clock;
pub mod combat;
pub mod config;
pub mod entities;
pub mod error;
pub mod host;
pub mod world;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SimConfig;
pub use entities::{ActiveEffect, EffectKind, MonsterDirectory, MonsterEntity};
pub use error::SimError;
pub use host::{Collaborators, MemoryCharacter, MemoryHost, SharedHost};
pub use world::{
    AttackOutcome, DamageOutcome, MonsterTemplateRegistry, Payout, SimulationScheduler, TickStats,
    WaveConfig, WaveSpawner,
};
