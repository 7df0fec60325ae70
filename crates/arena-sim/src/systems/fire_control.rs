//! Fire control: turns a held trigger into discrete shots.
//!
//! idle -> held (trigger down, counter reset) -> counting (one per held
//! frame) -> fire (counter exceeds `shot_duration`: emit a bullet, reset the
//! counter, stay held) -> idle (trigger released).

use arena_core::components::{Bullet, Gun, Player};
use arena_core::enums::EntityKind;
use arena_core::events::SimEvent;

use crate::pool::BulletPool;

/// What the gun did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Idle,
    Counting,
    Fired,
    /// A shot was due but the bullet pool was full.
    Dropped,
}

/// Advance the gun one frame and spawn a bullet when a shot is due.
pub fn run(
    gun: &mut Gun,
    player: &Player,
    fire_intent: bool,
    bullets: &mut BulletPool,
    events: &mut Vec<SimEvent>,
) -> FireOutcome {
    gun.barrel_exit = player.position;

    if !fire_intent {
        gun.trigger_down = false;
        gun.current_time = 0;
        return FireOutcome::Idle;
    }

    if !gun.trigger_down {
        gun.trigger_down = true;
        gun.current_time = 0;
        return FireOutcome::Counting;
    }

    gun.current_time += 1;
    if gun.current_time <= gun.shot_duration {
        return FireOutcome::Counting;
    }
    gun.current_time = 0;

    let bullet = Bullet {
        position: gun.barrel_exit,
        direction: player.aim,
        ..Default::default()
    };
    match bullets.push(bullet) {
        Some(_) => {
            events.push(SimEvent::ShotFired {
                position: bullet.position,
                direction: bullet.direction,
            });
            FireOutcome::Fired
        }
        None => {
            events.push(SimEvent::SpawnDropped {
                kind: EntityKind::Bullet,
            });
            FireOutcome::Dropped
        }
    }
}
