//! Systems that advance the simulation each frame.
//!
//! Systems are free functions over the pieces of state they touch. They do
//! not own state; the engine owns everything and calls them in order.

pub mod bullets;
pub mod cleanup;
pub mod enemies;
pub mod fire_control;
pub mod player;
pub mod snapshot;
pub mod spatial;
