//! Simulation configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use arena_core::constants::*;
use arena_core::enums::{CollisionMode, HitPolicy};

/// Configuration for starting a new simulation.
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Enemies spawned at session start. Spawns past `max_enemies` are dropped.
    pub enemy_count: usize,
    /// Enemies spawn with x and z in `[-spawn_spread, spawn_spread]`.
    pub spawn_spread: i32,
    pub max_bullets: usize,
    pub max_enemies: usize,
    pub quadtree_capacity: usize,
    pub quadtree_max_depth: u32,
    pub aim_dead_zone: f32,
    pub trigger_threshold: f32,
    pub collision_mode: CollisionMode,
    pub hit_policy: HitPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            enemy_count: MAX_ENEMIES,
            spawn_spread: ENEMY_SPAWN_SPREAD,
            max_bullets: MAX_BULLETS,
            max_enemies: MAX_ENEMIES,
            quadtree_capacity: QUADTREE_NODE_CAPACITY,
            quadtree_max_depth: QUADTREE_MAX_DEPTH,
            aim_dead_zone: AIM_DEAD_ZONE,
            trigger_threshold: TRIGGER_THRESHOLD,
            collision_mode: CollisionMode::default(),
            hit_policy: HitPolicy::default(),
        }
    }
}

impl SimConfig {
    /// An empty arena: no enemies spawned at start.
    pub fn empty_arena() -> Self {
        Self {
            enemy_count: 0,
            ..Default::default()
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bullets == 0 {
            return Err(ConfigError::ZeroCapacity { field: "max_bullets" });
        }
        if self.max_enemies == 0 {
            return Err(ConfigError::ZeroCapacity { field: "max_enemies" });
        }
        if self.quadtree_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "quadtree_capacity",
            });
        }
        if self.spawn_spread < 0 {
            return Err(ConfigError::OutOfRange {
                field: "spawn_spread",
                value: self.spawn_spread as f64,
            });
        }
        if !self.aim_dead_zone.is_finite() || self.aim_dead_zone < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "aim_dead_zone",
                value: self.aim_dead_zone as f64,
            });
        }
        if !self.trigger_threshold.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "trigger_threshold",
                value: self.trigger_threshold as f64,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroCapacity { field: &'static str },
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity { field } => write!(f, "{field} must be greater than zero"),
            Self::OutOfRange { field, value } => write!(f, "{field} has invalid value {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}
