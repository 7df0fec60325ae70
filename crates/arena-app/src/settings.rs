//! Simulation settings: an optional JSON file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use arena_core::enums::{CollisionMode, HitPolicy};
use arena_sim::SimConfig;

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub enemies: Option<usize>,
    pub brute_force: bool,
    pub consume_hits: bool,
}

/// Read the config file, or fall back to defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<SimConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Apply overrides and check the result.
pub fn resolve(mut config: SimConfig, overrides: &Overrides) -> Result<SimConfig> {
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(enemies) = overrides.enemies {
        config.enemy_count = enemies;
    }
    if overrides.brute_force {
        config.collision_mode = CollisionMode::BruteForce;
    }
    if overrides.consume_hits {
        config.hit_policy = HitPolicy::Consume;
    }
    config.validate().context("invalid simulation config")?;
    Ok(config)
}
