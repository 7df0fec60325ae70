//! Render snapshot: everything a renderer needs to draw one frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, GameScreen, Rgba};
use crate::events::SimEvent;
use crate::types::{EnemyId, FrameClock};

/// Complete visible state produced after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub clock: FrameClock,
    pub screen: GameScreen,
    pub player: Option<EntityView>,
    pub player_health: f32,
    pub aim: Vec3,
    pub bullets: Vec<EntityView>,
    pub enemies: Vec<EntityView>,
    pub events: Vec<SimEvent>,
}

/// One drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    /// Set for enemies only.
    pub enemy_id: Option<EnemyId>,
    pub position: Vec3,
    /// Full extents along x, y, z.
    pub extents: Vec3,
    pub color: Rgba,
}

impl EntityView {
    pub fn new(kind: EntityKind, position: Vec3, extents: Vec3) -> Self {
        Self {
            kind,
            enemy_id: None,
            position,
            extents,
            color: kind.color(),
        }
    }

    pub fn with_enemy_id(mut self, id: EnemyId) -> Self {
        self.enemy_id = Some(id);
        self
    }
}

impl RenderSnapshot {
    /// Number of entities a renderer would draw.
    pub fn drawable_count(&self) -> usize {
        self.player.iter().count() + self.bullets.len() + self.enemies.len()
    }
}
