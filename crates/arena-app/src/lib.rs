//! ARENA headless driver.
//!
//! This crate wires the simulation to a scripted input source and a
//! fixed-rate frame loop. It stands in for the window, gamepad, and
//! renderer a full game would provide.

pub mod game_loop;
pub mod script;
pub mod settings;

pub use arena_core as core;
