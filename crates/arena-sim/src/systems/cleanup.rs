//! Cleanup system: applies the frame's pending removals.

use arena_core::components::Enemy;
use arena_core::events::SimEvent;

use crate::pool::{BulletPool, EnemyPool};

/// Swap-remove every marked bullet and enemy.
/// Uses pre-allocated buffers to avoid per-frame allocation.
pub fn run(
    bullets: &mut BulletPool,
    bullet_removals: &mut Vec<usize>,
    enemies: &mut EnemyPool,
    enemy_removals: &mut Vec<usize>,
    removed_enemies: &mut Vec<Enemy>,
    events: &mut Vec<SimEvent>,
) {
    bullets.remove_indices(bullet_removals);

    removed_enemies.clear();
    enemies.remove_slots(enemy_removals, removed_enemies);
    for enemy in removed_enemies.drain(..) {
        tracing::trace!(enemy = %enemy.id, "enemy destroyed");
        events.push(SimEvent::EnemyDestroyed {
            enemy: enemy.id,
            position: enemy.position,
        });
    }
}
