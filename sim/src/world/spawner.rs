//! Wave spawner that feeds new monsters in from the right edge.
//!
//! The spawner only produces requests; the host hands them to
//! `SimulationScheduler::spawn_monster` so all spawns go through the
//! directory.

use std::path::Path;
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use horde_shared::Position;

use crate::error::SimError;

/// One weighted archetype choice in a wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub archetype_id: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default = "default_level")]
    pub min_level: u32,
    #[serde(default = "default_level")]
    pub max_level: u32,
}

fn default_weight() -> f32 {
    1.0
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub entries: Vec<SpawnEntry>,
    /// Time between waves
    pub interval_ms: u64,
    /// Monsters per wave
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Waves are skipped while this many monsters are live
    pub max_population: usize,
    /// Spawn x, normally just past the right edge of the screen
    pub spawn_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

fn default_burst() -> u32 {
    1
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            entries: vec![
                SpawnEntry { archetype_id: "slime".into(), weight: 5.0, min_level: 1, max_level: 2 },
                SpawnEntry { archetype_id: "bat".into(), weight: 3.0, min_level: 1, max_level: 3 },
                SpawnEntry { archetype_id: "goblin".into(), weight: 2.0, min_level: 2, max_level: 3 },
                SpawnEntry { archetype_id: "orc_captain".into(), weight: 0.5, min_level: 2, max_level: 4 },
            ],
            interval_ms: 2500,
            burst: 2,
            max_population: 24,
            spawn_x: 1400.0,
            min_y: 120.0,
            max_y: 560.0,
        }
    }
}

/// A monster the host should spawn
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub archetype_id: String,
    pub level: u32,
    pub position: Position,
}

#[derive(Debug)]
pub struct WaveSpawner {
    config: WaveConfig,
    since_last_wave_ms: u64,
}

impl WaveSpawner {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            since_last_wave_ms: 0,
        }
    }

    /// Load a wave config from a JSON file
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        let config: WaveConfig = serde_json::from_str(&content)
            .map_err(|e| SimError::Config(format!("Failed to parse {:?}: {}", path, e)))?;

        if config.entries.is_empty() {
            warn!("Wave config {:?} has no spawn entries", path);
        }
        info!("Loaded wave config with {} entries from {:?}", config.entries.len(), path);

        Ok(Self::new(config))
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Select a random entry based on weights
    pub fn select_entry(&self, rng: &mut impl Rng) -> Option<&SpawnEntry> {
        if self.config.entries.is_empty() {
            return None;
        }

        let total_weight: f32 = self.config.entries.iter().map(|e| e.weight.max(0.0)).sum();
        if total_weight <= 0.0 {
            return Some(&self.config.entries[0]);
        }

        let roll = rng.gen_range(0.0..total_weight);

        let mut cumulative = 0.0;
        for entry in &self.config.entries {
            cumulative += entry.weight.max(0.0);
            if roll < cumulative {
                return Some(entry);
            }
        }

        self.config.entries.last()
    }

    /// Advance the wave timer. Returns spawn requests for this tick.
    pub fn update(&mut self, delta_ms: u64, live_count: usize, rng: &mut impl Rng) -> Vec<SpawnRequest> {
        self.since_last_wave_ms += delta_ms;
        if self.since_last_wave_ms < self.config.interval_ms {
            return Vec::new();
        }
        self.since_last_wave_ms = 0;

        let room = self.config.max_population.saturating_sub(live_count);
        if room == 0 {
            debug!("Population at cap {}, skipping wave", self.config.max_population);
            return Vec::new();
        }

        let count = (self.config.burst as usize).min(room);
        let mut requests = Vec::with_capacity(count);

        for _ in 0..count {
            let Some(entry) = self.select_entry(rng) else {
                break;
            };
            let (lo, hi) = if entry.min_level <= entry.max_level {
                (entry.min_level, entry.max_level)
            } else {
                (entry.max_level, entry.min_level)
            };
            let level = rng.gen_range(lo..=hi).max(1);

            let y = if self.config.min_y < self.config.max_y {
                rng.gen_range(self.config.min_y..self.config.max_y)
            } else {
                self.config.min_y
            };

            requests.push(SpawnRequest {
                archetype_id: entry.archetype_id.clone(),
                level,
                position: Position::new(self.config.spawn_x, y),
            });
        }

        if !requests.is_empty() {
            info!("Wave: {} monsters ({} live)", requests.len(), live_count);
        }
        requests
    }
}
