//! Enemy spawn factories.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::Enemy;
use arena_core::constants::ENEMY_SPAWN_Y;
use arena_core::math::embed_planar;

use crate::pool::EnemyPool;

/// Spawn `count` randomly placed enemies. Returns how many fit in the pool.
pub fn spawn_enemy_batch(
    pool: &mut EnemyPool,
    rng: &mut ChaCha8Rng,
    count: usize,
    spread: i32,
) -> usize {
    let mut spawned = 0;
    for _ in 0..count {
        if pool.spawn(random_enemy(rng, spread)).is_some() {
            spawned += 1;
        }
    }
    if spawned < count {
        tracing::debug!(
            requested = count,
            spawned,
            capacity = pool.capacity(),
            "enemy batch truncated by pool capacity"
        );
    } else {
        tracing::debug!(spawned, "enemy batch spawned");
    }
    spawned
}

/// An enemy on integer coordinates in `[-spread, spread]` at spawn height,
/// heading in a random ground-plane direction.
pub fn random_enemy(rng: &mut ChaCha8Rng, spread: i32) -> Enemy {
    let x = rng.gen_range(-spread..=spread) as f32;
    let z = rng.gen_range(-spread..=spread) as f32;
    Enemy {
        position: Vec3::new(x, ENEMY_SPAWN_Y, z),
        direction: random_direction(rng),
        ..Default::default()
    }
}

/// Unit direction built from components in hundredths of `[-1, 1]`.
/// Redraws on the zero vector.
pub fn random_direction(rng: &mut ChaCha8Rng) -> Vec3 {
    loop {
        let dx = rng.gen_range(-100..=100) as f32 / 100.0;
        let dz = rng.gen_range(-100..=100) as f32 / 100.0;
        if let Some(n) = Vec2::new(dx, dz).try_normalize() {
            return embed_planar(n);
        }
    }
}
