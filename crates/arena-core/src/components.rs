//! Entity records stored in the simulation pools.
//!
//! Records are plain data. `Default` yields the stock tuning values and is
//! also the "zero-valued record" written into vacated pool slots.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::EnemyId;

/// The player avatar. One per session, never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Unit aim direction on the ground plane (y = 0).
    pub aim: Vec3,
    pub speed: f32,
    /// Drops on enemy contact. Nothing happens at zero.
    pub health: f32,
    /// Edge length of the player's collision cube.
    pub size: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            aim: Vec3::X,
            speed: PLAYER_SPEED,
            health: PLAYER_HEALTH,
            size: PLAYER_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Vec3,
    /// Unit movement direction on the ground plane.
    pub direction: Vec3,
    pub speed: f32,
    /// Removed at the end of the frame in which this reaches zero.
    pub health: f32,
    /// Health taken from the player per frame of contact.
    pub damage: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            id: EnemyId::default(),
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            speed: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            damage: ENEMY_CONTACT_DAMAGE,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
        }
    }
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vec3,
    /// Copied from the player's aim at the moment of firing.
    pub direction: Vec3,
    pub speed: f32,
    /// Frames since spawn.
    pub age: u32,
    pub damage: f32,
    /// Collision radius.
    pub size: f32,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            speed: BULLET_SPEED,
            age: 0,
            damage: BULLET_DAMAGE,
            size: BULLET_SIZE,
        }
    }
}

impl Bullet {
    pub fn is_expired(&self) -> bool {
        self.age >= BULLET_MAX_AGE
    }
}

/// Fire-control state for the player's gun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gun {
    /// Where new bullets appear. Follows the player every frame.
    pub barrel_exit: Vec3,
    /// Frames the counter must exceed before a shot.
    pub shot_duration: u32,
    /// Frames counted since the trigger went down or the last shot.
    pub current_time: u32,
    pub trigger_down: bool,
}

impl Default for Gun {
    fn default() -> Self {
        Self {
            barrel_exit: Vec3::ZERO,
            shot_duration: GUN_SHOT_DURATION,
            current_time: 0,
            trigger_down: false,
        }
    }
}
