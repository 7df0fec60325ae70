//! Per-frame input snapshot.
//!
//! An input collaborator outside this crate maps keyboard and gamepad state
//! into this shape once per frame. Values are not validated here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::TRIGGER_THRESHOLD;

/// Normalized controller state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Movement stick. `y` maps to world z.
    pub left_axis: Vec2,
    /// Aim stick. `y` maps to world z.
    pub right_axis: Vec2,
    /// Analog right trigger, 0.0 released to 1.0 fully pulled.
    pub trigger_right: f32,
    /// Digital fire button.
    pub fire_button: bool,
    /// Start / enter.
    pub confirm_button: bool,
    /// Back / escape.
    pub cancel_button: bool,
}

impl InputSnapshot {
    /// Whether the gun should be treated as held this frame.
    pub fn fire_intent(&self) -> bool {
        self.fire_intent_with(TRIGGER_THRESHOLD)
    }

    /// Same as [`fire_intent`](Self::fire_intent) with a custom trigger threshold.
    pub fn fire_intent_with(&self, trigger_threshold: f32) -> bool {
        self.fire_button || self.trigger_right > trigger_threshold
    }

    /// Convenience constructor for a held-fire frame aiming along `aim`.
    pub fn firing(aim: Vec2) -> Self {
        Self {
            right_axis: aim,
            fire_button: true,
            ..Default::default()
        }
    }
}
