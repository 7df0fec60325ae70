//! Scripted input sources.

use glam::Vec2;

use arena_core::enums::GameScreen;
use arena_core::input::InputSnapshot;

/// Produces one input snapshot per frame.
pub trait InputSource {
    /// Input for the frame about to run.
    fn next_input(&mut self, screen: GameScreen, frame: u64) -> InputSnapshot;
}

/// Presses confirm on the title screen, then circles the aim with the
/// trigger held while strafing in a slow loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepScript {
    /// Radians of aim rotation per frame.
    pub sweep_rate: f32,
    /// Left stick magnitude. Zero stands still.
    pub strafe: f32,
}

impl Default for SweepScript {
    fn default() -> Self {
        Self {
            sweep_rate: 0.05,
            strafe: 0.25,
        }
    }
}

impl InputSource for SweepScript {
    fn next_input(&mut self, screen: GameScreen, frame: u64) -> InputSnapshot {
        match screen {
            GameScreen::Logo | GameScreen::Title => InputSnapshot {
                confirm_button: true,
                ..Default::default()
            },
            GameScreen::Gameplay => {
                let angle = frame as f32 * self.sweep_rate;
                InputSnapshot {
                    left_axis: Vec2::from_angle(angle * 0.1) * self.strafe,
                    right_axis: Vec2::from_angle(angle),
                    trigger_right: 1.0,
                    ..Default::default()
                }
            }
            GameScreen::Ending => InputSnapshot::default(),
        }
    }
}

/// Plays back a fixed list of inputs, then neutral input forever.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    inputs: Vec<InputSnapshot>,
    cursor: usize,
}

impl Replay {
    pub fn new(inputs: Vec<InputSnapshot>) -> Self {
        Self { inputs, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len().saturating_sub(self.cursor)
    }
}

impl InputSource for Replay {
    fn next_input(&mut self, _screen: GameScreen, _frame: u64) -> InputSnapshot {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }
}
