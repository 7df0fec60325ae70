//! Core types and definitions for the arena shooter simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! vector helpers, entity records, the per-frame input snapshot, events,
//! render snapshots, and tuning constants. It has no dependency on any
//! windowing or rendering framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod math;
pub mod state;
pub mod types;
