//! Monster template registry.
//!
//! Immutable after construction. Loading problems are startup errors;
//! once built, lookups never fail except for unknown ids.

use std::collections::HashMap;
use std::path::Path;
use log::{info, warn};
use horde_shared::{get_monster_templates, MonsterTemplate};

use crate::error::SimError;

/// Read-only catalog of monster archetypes, keyed by archetype id
#[derive(Debug, Clone)]
pub struct MonsterTemplateRegistry {
    templates: HashMap<String, MonsterTemplate>,
}

impl MonsterTemplateRegistry {
    /// Registry built from the built-in catalog
    pub fn with_defaults() -> Result<Self, SimError> {
        let registry = Self::from_templates(get_monster_templates())?;
        info!("Loaded {} built-in monster templates", registry.len());
        Ok(registry)
    }

    pub fn from_templates(templates: Vec<MonsterTemplate>) -> Result<Self, SimError> {
        let mut map = HashMap::with_capacity(templates.len());

        for template in templates {
            validate(&template)?;
            if map.contains_key(&template.archetype_id) {
                return Err(SimError::DuplicateArchetype(template.archetype_id));
            }
            map.insert(template.archetype_id.clone(), template);
        }

        Ok(Self { templates: map })
    }

    /// Load templates from a JSON array file
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        let templates: Vec<MonsterTemplate> = serde_json::from_str(&content)
            .map_err(|e| SimError::Config(format!("Failed to parse {:?}: {}", path, e)))?;

        let registry = Self::from_templates(templates)?;
        info!("Loaded {} monster templates from {:?}", registry.len(), path);
        Ok(registry)
    }

    pub fn get(&self, archetype_id: &str) -> Option<&MonsterTemplate> {
        self.templates.get(archetype_id)
    }

    pub fn contains(&self, archetype_id: &str) -> bool {
        self.templates.contains_key(archetype_id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Archetype ids in sorted order
    pub fn archetype_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

fn validate(template: &MonsterTemplate) -> Result<(), SimError> {
    let invalid = |reason: &str| SimError::InvalidTemplate {
        archetype_id: template.archetype_id.clone(),
        reason: reason.to_string(),
    };

    if template.archetype_id.is_empty() {
        return Err(invalid("archetype id is empty"));
    }
    if template.frame_count == 0 {
        return Err(invalid("frame_count must be at least 1"));
    }
    if template.frame_duration_ms == 0 {
        return Err(invalid("frame_duration_ms must be positive"));
    }
    if template.attack_cooldown_ms == 0 {
        return Err(invalid("attack_cooldown_ms must be positive"));
    }

    // Bad drop entries are tolerated; the loot roll skips them.
    for entry in &template.drop_table {
        let [min, max] = entry.quantity_range;
        if min > max {
            let err = SimError::InvalidDropTableEntry {
                archetype_id: template.archetype_id.clone(),
                item_id: entry.item_id.clone(),
                reason: format!("min {} > max {}", min, max),
            };
            warn!("{}", err);
        }
    }

    Ok(())
}
