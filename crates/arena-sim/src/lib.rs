//! Simulation engine for the arena shooter.
//!
//! Owns the entity pools, runs systems once per frame, and produces
//! RenderSnapshots for an external renderer.

pub mod config;
pub mod engine;
pub mod invariants;
pub mod pool;
pub mod quadtree;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use config::SimConfig;
pub use engine::ArenaEngine;

#[cfg(test)]
mod tests;
