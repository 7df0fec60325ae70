//! Frame loop: feeds input to the engine one frame at a time and tallies
//! what happened.
//!
//! Runs flat out by default. With `realtime` set it sleeps to hold
//! `FRAME_RATE`, and skips ahead instead of bursting when it falls behind.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use arena_core::constants::{DT, FRAME_RATE};
use arena_core::enums::GameScreen;
use arena_core::events::SimEvent;
use arena_core::state::RenderSnapshot;
use arena_sim::ArenaEngine;

use crate::script::InputSource;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Frames between progress log lines.
const PROGRESS_INTERVAL: u64 = FRAME_RATE as u64 * 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Upper bound on frames to run.
    pub frames: u64,
    /// Sleep between frames to match wall-clock time.
    pub realtime: bool,
    /// Stop as soon as the session reaches the ending screen.
    pub stop_on_ending: bool,
}

/// Totals for one run of the loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Frames the loop ran, including ones spent off the gameplay screen.
    pub frames: u64,
    /// Frames in which the world advanced.
    pub sim_frames: u64,
    pub shots_fired: u64,
    pub enemy_hits: u64,
    pub enemies_destroyed: u64,
    pub player_hits: u64,
    pub bullets_expired: u64,
    pub spawns_dropped: u64,
    pub enemies_remaining: usize,
    pub player_health: f32,
    pub final_screen: GameScreen,
}

impl RunSummary {
    fn record(&mut self, snapshot: &RenderSnapshot) {
        self.frames += 1;
        for event in &snapshot.events {
            match event {
                SimEvent::ShotFired { .. } => self.shots_fired += 1,
                SimEvent::EnemyHit { .. } => self.enemy_hits += 1,
                SimEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
                SimEvent::PlayerHit { .. } => self.player_hits += 1,
                SimEvent::BulletExpired { .. } => self.bullets_expired += 1,
                SimEvent::SpawnDropped { .. } => self.spawns_dropped += 1,
                SimEvent::ScreenChanged { .. } => {}
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== RUN SUMMARY ===")?;
        writeln!(f, "  Frames:        {} ({} simulated)", self.frames, self.sim_frames)?;
        writeln!(f, "  Shots fired:   {}", self.shots_fired)?;
        writeln!(f, "  Enemy hits:    {}", self.enemy_hits)?;
        writeln!(f, "  Destroyed:     {}", self.enemies_destroyed)?;
        writeln!(f, "  Remaining:     {}", self.enemies_remaining)?;
        writeln!(f, "  Player hits:   {}", self.player_hits)?;
        writeln!(f, "  Player health: {:.1}", self.player_health)?;
        writeln!(f, "  Expired:       {}", self.bullets_expired)?;
        writeln!(f, "  Dropped:       {}", self.spawns_dropped)?;
        write!(f, "  Final screen:  {:?}", self.final_screen)
    }
}

/// Run the loop until `options.frames` have passed or the session ends.
///
/// Returns the totals and the last snapshot produced, if any.
pub fn run_game_loop(
    engine: &mut ArenaEngine,
    input: &mut impl InputSource,
    options: LoopOptions,
) -> (RunSummary, Option<RenderSnapshot>) {
    let start_frame = engine.clock().frame;
    let mut summary = RunSummary::default();
    let mut last_snapshot = None;
    let mut next_frame_time = Instant::now();

    for _ in 0..options.frames {
        let frame_input = input.next_input(engine.screen(), engine.clock().frame);
        let snapshot = engine.tick(&frame_input, DT);
        summary.record(&snapshot);

        if summary.frames % PROGRESS_INTERVAL == 0 {
            tracing::debug!(
                frame = snapshot.clock.frame,
                enemies = snapshot.enemies.len(),
                bullets = snapshot.bullets.len(),
                health = snapshot.player_health,
                "progress"
            );
        }

        let ended = snapshot.screen == GameScreen::Ending;
        last_snapshot = Some(snapshot);
        if ended && options.stop_on_ending {
            tracing::info!(frames = summary.frames, "arena cleared");
            break;
        }

        if options.realtime {
            pace(&mut next_frame_time);
        }
    }

    summary.sim_frames = engine.clock().frame - start_frame;
    summary.enemies_remaining = engine.enemies().len();
    summary.player_health = engine.player().health;
    summary.final_screen = engine.screen();
    (summary, last_snapshot)
}

/// Sleep until the next frame is due.
fn pace(next_frame_time: &mut Instant) {
    *next_frame_time += FRAME_DURATION;
    let now = Instant::now();
    if *next_frame_time > now {
        std::thread::sleep(*next_frame_time - now);
    } else if now - *next_frame_time > FRAME_DURATION * 2 {
        // Too far behind, reset to avoid a catch-up spiral
        *next_frame_time = now;
    }
}
