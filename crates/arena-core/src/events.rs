//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, GameScreen};
use crate::types::EnemyId;

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The gun emitted a bullet.
    ShotFired { position: Vec3, direction: Vec3 },
    /// A bullet overlapped an enemy and dealt damage.
    EnemyHit {
        enemy: EnemyId,
        damage: f32,
        remaining_health: f32,
    },
    /// An enemy's health reached zero and it was removed.
    EnemyDestroyed { enemy: EnemyId, position: Vec3 },
    /// An enemy touched the player.
    PlayerHit {
        enemy: EnemyId,
        damage: f32,
        remaining_health: f32,
    },
    /// A bullet reached its maximum age and was removed.
    BulletExpired { position: Vec3 },
    /// A spawn was dropped because its pool was full.
    SpawnDropped { kind: EntityKind },
    /// The session moved to another screen.
    ScreenChanged { from: GameScreen, to: GameScreen },
}
