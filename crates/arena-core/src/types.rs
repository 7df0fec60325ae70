//! Identifiers and frame timing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable enemy identifier, assigned once at spawn.
///
/// Pool slots move when other enemies are removed; the id does not. The
/// spatial index stores ids so it never depends on slot positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E#{}", self.0)
    }
}

/// Frame counter and accumulated simulated time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Frames simulated so far.
    pub frame: u64,
    /// Sum of all `dt` values passed to the simulation (seconds).
    pub elapsed_secs: f64,
}

impl FrameClock {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
    }
}
