//! Simulation constants and tuning parameters.

/// Target frame rate (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the target frame rate.
pub const DT: f32 = 1.0 / FRAME_RATE as f32;

// --- Pools ---

/// Capacity of the bullet pool.
pub const MAX_BULLETS: usize = 256;

/// Capacity of the enemy pool.
pub const MAX_ENEMIES: usize = 1024;

// --- Player ---

pub const PLAYER_SPEED: f32 = 30.5;
pub const PLAYER_SIZE: f32 = 2.0;
pub const PLAYER_HEALTH: f32 = 100.0;

// --- Input ---

/// Right-stick magnitude at or below which the previous aim is kept.
pub const AIM_DEAD_ZONE: f32 = 0.06;

/// Right trigger value above which the gun counts as held.
pub const TRIGGER_THRESHOLD: f32 = 0.7;

// --- Gun ---

/// Frames the fire-control counter must exceed before a shot.
/// A held trigger fires every `GUN_SHOT_DURATION + 1` frames.
pub const GUN_SHOT_DURATION: u32 = 8;

// --- Bullets ---

pub const BULLET_SPEED: f32 = 60.0;
pub const BULLET_DAMAGE: f32 = 100.0;
pub const BULLET_SIZE: f32 = 0.7;

/// Age in frames at which a bullet is removed.
pub const BULLET_MAX_AGE: u32 = 120;

// --- Enemies ---

pub const ENEMY_SPEED: f32 = 8.0;
pub const ENEMY_HEALTH: f32 = 100.0;
pub const ENEMY_CONTACT_DAMAGE: f32 = 10.0;
pub const ENEMY_WIDTH: f32 = 1.1;
pub const ENEMY_HEIGHT: f32 = 1.8;

/// Spawn height of enemies (ground plane is y = 0).
pub const ENEMY_SPAWN_Y: f32 = 1.0;

/// Enemies spawn on integer coordinates in `[-ENEMY_SPAWN_SPREAD, ENEMY_SPAWN_SPREAD]`.
pub const ENEMY_SPAWN_SPREAD: i32 = 100;

// --- Spatial index ---

/// Enemy ids stored per quadtree node before it subdivides.
pub const QUADTREE_NODE_CAPACITY: usize = 8;

/// Depth below which nodes no longer subdivide.
pub const QUADTREE_MAX_DEPTH: u32 = 8;

/// Padding added around the enemy bounding box when sizing the root node.
pub const QUADTREE_ROOT_MARGIN: f32 = 1.0;
