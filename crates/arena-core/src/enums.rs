//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which screen the session is on. Only `Gameplay` advances the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameScreen {
    Logo,
    #[default]
    Title,
    Gameplay,
    Ending,
}

/// Kind of a drawable entity, used by renderers to pick shape and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Drawn as a cube.
    Player,
    /// Drawn as a sphere of the bullet's radius.
    Bullet,
    /// Drawn as a box of width x height x width.
    Enemy,
}

impl EntityKind {
    /// Display color for this kind.
    pub fn color(self) -> Rgba {
        match self {
            EntityKind::Player => Rgba::BLUE,
            EntityKind::Bullet => Rgba::YELLOW,
            EntityKind::Enemy => Rgba::RED,
        }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLUE: Rgba = Rgba::new(0, 121, 241, 255);
    pub const YELLOW: Rgba = Rgba::new(253, 249, 0, 255);
    pub const RED: Rgba = Rgba::new(230, 41, 55, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// How bullet-vs-enemy candidates are found each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Query the per-frame quadtree.
    #[default]
    Indexed,
    /// Test every bullet against every live enemy.
    BruteForce,
}

/// What happens to a bullet that overlaps an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Bullets pass through and keep flying until they age out.
    #[default]
    Pierce,
    /// Bullets are removed at the end of the first frame in which they hit.
    Consume,
}
