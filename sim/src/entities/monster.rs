//! Simulation state for one spawned monster.
//!
//! Every timer is a timestamp compared against the clock on each tick;
//! nothing here schedules callbacks.

use horde_shared::{
    CharacterId, CombatState, CombatStats, Facing, MonsterId, MonsterTemplate, MonsterTier,
    MovementState, Position, RenderState, SpriteRefs, SpriteSelector,
};

use crate::combat::ScaledStats;

/// Kinds of timed modifier a monster can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Added to attack (may be negative)
    AttackBonus,
    /// Added to defense (may be negative)
    DefenseBonus,
    /// Multiplies vertical wander speed
    SpeedMultiplier,
}

/// Timed modifier, dropped lazily once expired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub value: f32,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

impl ActiveEffect {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.duration_ms
    }
}

/// Server-side monster state
#[derive(Debug, Clone)]
pub struct MonsterEntity {
    pub id: MonsterId,
    pub archetype_id: String,
    pub tier: MonsterTier,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u64,
    pub crit_chance: f64,
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    /// Wander anchor
    pub base_y: f32,
    pub vertical_range: f32,
    /// +1 moves down, -1 moves up
    pub vertical_direction: f32,
    /// Units per second
    pub vertical_speed: f32,
    pub movement_state: MovementState,
    pub wander_toggled_at_ms: u64,
    pub is_hit: bool,
    pub is_attacking: bool,
    pub is_dead: bool,
    pub last_attack_at_ms: u64,
    pub attack_cooldown_ms: u64,
    pub attack_at_ms: Option<u64>,
    pub hit_at_ms: Option<u64>,
    pub stun_duration_ms: u64,
    pub died_at_ms: Option<u64>,
    pub last_damaged_by: Option<CharacterId>,
    pub current_frame: u32,
    pub frame_count: u32,
    pub frame_duration_ms: u64,
    pub last_frame_at_ms: u64,
    pub active_effects: Vec<ActiveEffect>,
    pub sprite_refs: SpriteRefs,
}

impl MonsterEntity {
    pub fn new(
        id: MonsterId,
        template: &MonsterTemplate,
        stats: &ScaledStats,
        position: Position,
        vertical_range: f32,
        vertical_direction: f32,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            archetype_id: template.archetype_id.clone(),
            tier: template.tier,
            level: stats.level,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            defense: stats.defense,
            experience: stats.experience,
            crit_chance: template.crit_chance,
            position,
            width: stats.width,
            height: stats.height,
            facing: Facing::Left,
            base_y: position.y,
            vertical_range,
            vertical_direction: if vertical_direction < 0.0 { -1.0 } else { 1.0 },
            vertical_speed: template.base_speed,
            movement_state: MovementState::Idle,
            wander_toggled_at_ms: now_ms,
            is_hit: false,
            is_attacking: false,
            is_dead: false,
            last_attack_at_ms: now_ms,
            attack_cooldown_ms: template.attack_cooldown_ms,
            attack_at_ms: None,
            hit_at_ms: None,
            stun_duration_ms: template.stun_duration_ms,
            died_at_ms: None,
            last_damaged_by: None,
            current_frame: 0,
            frame_count: template.frame_count.max(1),
            frame_duration_ms: template.frame_duration_ms.max(1),
            last_frame_at_ms: now_ms,
            active_effects: Vec::new(),
            sprite_refs: template.sprite_refs.clone(),
        }
    }

    pub fn is_boss(&self) -> bool {
        self.tier == MonsterTier::Boss
    }

    pub fn combat_state(&self) -> CombatState {
        if self.is_dead {
            CombatState::Dead
        } else if self.is_hit {
            CombatState::Hit
        } else if self.is_attacking {
            CombatState::Attacking
        } else {
            CombatState::Neutral
        }
    }

    /// Sprite priority: hit > attacking > idle
    pub fn sprite_selector(&self) -> SpriteSelector {
        if self.is_hit {
            SpriteSelector::Hit
        } else if self.is_attacking {
            SpriteSelector::AttackHit
        } else {
            SpriteSelector::Idle
        }
    }

    pub fn sprite_ref(&self) -> &str {
        match self.sprite_selector() {
            SpriteSelector::Idle => &self.sprite_refs.idle,
            SpriteSelector::Hit => &self.sprite_refs.hit,
            SpriteSelector::AttackHit => &self.sprite_refs.attack_hit,
        }
    }

    /// Stunned while less than `stun_duration_ms` has passed since the last hit
    pub fn is_stunned(&self, now_ms: u64) -> bool {
        self.hit_at_ms
            .map(|hit_at| now_ms.saturating_sub(hit_at) < self.stun_duration_ms)
            .unwrap_or(false)
    }

    pub fn attack_ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_attack_at_ms) >= self.attack_cooldown_ms
    }

    /// Unexpired effects of `kind`; expired entries are ignored even before
    /// `expire_effects` drops them
    fn active_effects_of(&self, kind: EffectKind, now_ms: u64) -> impl Iterator<Item = &ActiveEffect> {
        self.active_effects
            .iter()
            .filter(move |e| e.kind == kind && !e.is_expired(now_ms))
    }

    fn effect_total(&self, kind: EffectKind, now_ms: u64) -> f32 {
        self.active_effects_of(kind, now_ms).map(|e| e.value).sum()
    }

    pub fn effective_attack(&self, now_ms: u64) -> u32 {
        (self.attack as f32 + self.effect_total(EffectKind::AttackBonus, now_ms)).max(0.0).round() as u32
    }

    pub fn effective_defense(&self, now_ms: u64) -> u32 {
        (self.defense as f32 + self.effect_total(EffectKind::DefenseBonus, now_ms)).max(0.0).round() as u32
    }

    pub fn speed_multiplier(&self, now_ms: u64) -> f32 {
        self.active_effects_of(EffectKind::SpeedMultiplier, now_ms)
            .fold(1.0, |acc, e| acc * e.value.max(0.0))
    }

    /// Attacker stats as of `now_ms`, including active bonuses
    pub fn combat_stats(&self, now_ms: u64) -> CombatStats {
        CombatStats::new(self.effective_attack(now_ms), self.effective_defense(now_ms))
            .with_crit_chance(self.crit_chance)
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Advance the presentation clock by at most one frame
    pub fn advance_animation(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_frame_at_ms) >= self.frame_duration_ms {
            self.current_frame = (self.current_frame + 1) % self.frame_count;
            self.last_frame_at_ms = now_ms;
        }
    }

    /// Clear the hit sprite once its flash has played. The stun gate is separate.
    pub fn expire_hit_flash(&mut self, now_ms: u64, hit_flash_ms: u64) {
        if let (true, Some(hit_at)) = (self.is_hit, self.hit_at_ms) {
            if now_ms.saturating_sub(hit_at) >= hit_flash_ms {
                self.is_hit = false;
            }
        }
    }

    pub fn expire_attack(&mut self, now_ms: u64, attack_anim_ms: u64) {
        if !self.is_attacking {
            return;
        }
        let started = self.attack_at_ms.unwrap_or(self.last_attack_at_ms);
        if now_ms.saturating_sub(started) >= attack_anim_ms {
            self.is_attacking = false;
        }
    }

    pub fn expire_effects(&mut self, now_ms: u64) {
        self.active_effects.retain(|e| !e.is_expired(now_ms));
    }

    /// Enter the attack window. Suppresses the hit sprite so the two never overlap.
    pub fn begin_attack(&mut self, now_ms: u64) {
        self.is_hit = false;
        self.is_attacking = true;
        self.attack_at_ms = Some(now_ms);
        self.last_attack_at_ms = now_ms;
    }

    /// Subtract already-mitigated damage. Returns remaining health.
    pub fn take_damage(&mut self, damage: u32, source: CharacterId, now_ms: u64) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.is_hit = true;
        self.is_attacking = false;
        self.hit_at_ms = Some(now_ms);
        self.last_damaged_by = Some(source);
        self.health
    }

    /// Flag death. Returns false if the monster was already dead.
    pub fn mark_dead(&mut self, now_ms: u64) -> bool {
        if self.is_dead {
            return false;
        }
        self.is_dead = true;
        self.died_at_ms = Some(now_ms);
        self.health = 0;
        self.is_attacking = false;
        self.movement_state = MovementState::Stopped;
        true
    }

    pub fn stop_and_face(&mut self, target_x: f32) {
        self.movement_state = MovementState::Stopped;
        self.facing = Facing::toward(self.position.x, target_x);
    }

    /// Drift with the world scroll and bob vertically around `base_y`.
    ///
    /// The idle/moving toggle flips every `toggle_ms`; vertical motion only
    /// happens while moving.
    pub fn wander(&mut self, delta_ms: u64, now_ms: u64, scroll_speed: f32, toggle_ms: u64) {
        if self.movement_state == MovementState::Stopped {
            self.movement_state = MovementState::Moving;
            self.wander_toggled_at_ms = now_ms;
        } else if now_ms.saturating_sub(self.wander_toggled_at_ms) >= toggle_ms {
            self.movement_state = match self.movement_state {
                MovementState::Moving => MovementState::Idle,
                _ => MovementState::Moving,
            };
            self.wander_toggled_at_ms = now_ms;
        }

        let dt = delta_ms as f32 / 1000.0;
        self.facing = Facing::Left;
        self.position.x -= scroll_speed * dt;

        if self.movement_state != MovementState::Moving {
            return;
        }

        let half = self.vertical_range / 2.0;
        let min_y = self.base_y - half;
        let max_y = self.base_y + half;

        self.position.y += self.vertical_speed * self.speed_multiplier(now_ms) * dt * self.vertical_direction;
        if self.position.y >= max_y {
            self.position.y = max_y;
            self.vertical_direction = -1.0;
        } else if self.position.y <= min_y {
            self.position.y = min_y;
            self.vertical_direction = 1.0;
        }
    }

    /// True once the right edge has scrolled past `visible_min_x`
    pub fn is_off_screen(&self, visible_min_x: f32) -> bool {
        self.position.x + self.width < visible_min_x
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            monster_id: self.id,
            archetype_id: self.archetype_id.clone(),
            position: self.position,
            width: self.width,
            height: self.height,
            facing: self.facing,
            movement_state: self.movement_state,
            current_frame: self.current_frame,
            sprite: self.sprite_selector(),
            sprite_ref: self.sprite_ref().to_string(),
            health_fraction: self.health_fraction(),
            is_hit: self.is_hit,
            is_attacking: self.is_attacking,
            is_dead: self.is_dead,
        }
    }
}
