//! Enemy movement and enemy-vs-player contact.

use arena_core::components::Player;
use arena_core::events::SimEvent;
use arena_core::math::planar_distance;

use crate::pool::EnemyPool;

/// Move every enemy and resolve contact with the player, highest slot first.
///
/// Contact costs the player the enemy's damage and bounces the enemy by
/// negating the x and y components of its direction. Enemies at or below
/// zero health are pushed onto `removals`.
pub fn run(
    enemies: &mut EnemyPool,
    player: &mut Player,
    dt: f32,
    removals: &mut Vec<usize>,
    events: &mut Vec<SimEvent>,
) {
    let live = enemies.as_mut_slice();
    for slot in (0..live.len()).rev() {
        let enemy = &mut live[slot];
        enemy.position += enemy.direction * enemy.speed * dt;

        let distance = planar_distance(enemy.position, player.position);
        if distance < player.size / 2.0 + enemy.width / 2.0 {
            player.health -= enemy.damage;
            enemy.direction.x = -enemy.direction.x;
            enemy.direction.y = -enemy.direction.y;
            events.push(SimEvent::PlayerHit {
                enemy: enemy.id,
                damage: enemy.damage,
                remaining_health: player.health,
            });
        }

        if !enemy.is_alive() {
            removals.push(slot);
        }
    }
}
