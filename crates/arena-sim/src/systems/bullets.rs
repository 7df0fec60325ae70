//! Bullet integration, aging, and bullet-vs-enemy damage.

use arena_core::components::{Bullet, Enemy};
use arena_core::enums::{CollisionMode, HitPolicy};
use arena_core::events::SimEvent;
use arena_core::math::{planar, planar_distance};
use arena_core::types::EnemyId;

use crate::pool::{BulletPool, EnemyPool};
use crate::systems::spatial::EnemyIndex;

/// Scratch buffers and settings for one bullet pass.
pub struct BulletPass<'a> {
    pub mode: CollisionMode,
    pub policy: HitPolicy,
    pub dt: f32,
    pub index: &'a EnemyIndex,
    /// Reused candidate buffer.
    pub candidates: &'a mut Vec<EnemyId>,
    /// Receives slots of bullets to remove at the end of the frame.
    pub removals: &'a mut Vec<usize>,
}

/// A bullet overlaps an enemy when their ground-plane distance is below
/// the bullet radius plus the enemy width.
#[inline]
pub fn overlaps(bullet: &Bullet, enemy: &Enemy) -> bool {
    planar_distance(bullet.position, enemy.position) < bullet.size + enemy.width
}

/// Move and age every bullet, then damage each enemy it overlaps.
///
/// A bullet damages every enemy it overlaps in a frame. Enemies already at
/// or below zero health this frame still take damage until cleanup.
pub fn run(
    bullets: &mut BulletPool,
    enemies: &mut EnemyPool,
    pass: BulletPass<'_>,
    events: &mut Vec<SimEvent>,
) {
    for (slot, bullet) in bullets.as_mut_slice().iter_mut().enumerate() {
        bullet.position += bullet.direction * bullet.speed * pass.dt;
        bullet.age = bullet.age.saturating_add(1);

        let hits = match pass.mode {
            CollisionMode::BruteForce => damage_all(bullet, enemies, events),
            CollisionMode::Indexed => {
                damage_candidates(bullet, enemies, pass.index, pass.candidates, events)
            }
        };

        if bullet.is_expired() {
            events.push(SimEvent::BulletExpired {
                position: bullet.position,
            });
            pass.removals.push(slot);
        } else if hits > 0 && pass.policy == HitPolicy::Consume {
            pass.removals.push(slot);
        }
    }
}

fn damage_all(bullet: &Bullet, enemies: &mut EnemyPool, events: &mut Vec<SimEvent>) -> usize {
    let mut hits = 0;
    for enemy in enemies.as_mut_slice() {
        if overlaps(bullet, enemy) {
            apply_hit(bullet, enemy, events);
            hits += 1;
        }
    }
    hits
}

fn damage_candidates(
    bullet: &Bullet,
    enemies: &mut EnemyPool,
    index: &EnemyIndex,
    candidates: &mut Vec<EnemyId>,
    events: &mut Vec<SimEvent>,
) -> usize {
    candidates.clear();
    index.candidates(planar(bullet.position), bullet.size, candidates);
    // Slot order, so hits and events come out as in a full scan.
    candidates.sort_unstable_by_key(|id| enemies.slot_of(*id));

    let mut hits = 0;
    for id in candidates.iter() {
        let Some(enemy) = enemies.get_mut(*id) else {
            continue;
        };
        if overlaps(bullet, enemy) {
            apply_hit(bullet, enemy, events);
            hits += 1;
        }
    }
    hits
}

fn apply_hit(bullet: &Bullet, enemy: &mut Enemy, events: &mut Vec<SimEvent>) {
    enemy.health -= bullet.damage;
    events.push(SimEvent::EnemyHit {
        enemy: enemy.id,
        damage: bullet.damage,
        remaining_health: enemy.health,
    });
}
