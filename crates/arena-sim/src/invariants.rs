//! Pool invariant checks.
//!
//! Run between frames (after cleanup). Useful in tests and debug builds to
//! catch bookkeeping bugs in the pools.

use std::collections::HashSet;
use std::fmt;

use arena_core::enums::EntityKind;
use arena_core::types::EnemyId;

use crate::pool::{BulletPool, EnemyPool};

#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    OverCapacity {
        kind: EntityKind,
        len: usize,
        capacity: usize,
    },
    DuplicateEnemyId {
        enemy: EnemyId,
    },
    SlotMapMismatch {
        enemy: EnemyId,
        mapped: Option<usize>,
        actual: usize,
    },
    SlotMapSize {
        mapped: usize,
        live: usize,
    },
    DeadEnemyRetained {
        enemy: EnemyId,
        health: f32,
    },
    ExpiredBulletRetained {
        slot: usize,
        age: u32,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverCapacity {
                kind,
                len,
                capacity,
            } => write!(f, "{kind:?} pool holds {len} entries, capacity {capacity}"),
            Self::DuplicateEnemyId { enemy } => write!(f, "{enemy} occupies more than one slot"),
            Self::SlotMapMismatch {
                enemy,
                mapped,
                actual,
            } => write!(f, "{enemy} is in slot {actual} but mapped to {mapped:?}"),
            Self::SlotMapSize { mapped, live } => {
                write!(f, "slot map has {mapped} ids for {live} live enemies")
            }
            Self::DeadEnemyRetained { enemy, health } => {
                write!(f, "{enemy} survived cleanup with health {health}")
            }
            Self::ExpiredBulletRetained { slot, age } => {
                write!(f, "bullet in slot {slot} survived cleanup at age {age}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Check both pools. Returns the first violation found.
pub fn check(bullets: &BulletPool, enemies: &EnemyPool) -> Result<(), InvariantViolation> {
    if bullets.len() > bullets.capacity() {
        return Err(InvariantViolation::OverCapacity {
            kind: EntityKind::Bullet,
            len: bullets.len(),
            capacity: bullets.capacity(),
        });
    }
    if enemies.len() > enemies.capacity() {
        return Err(InvariantViolation::OverCapacity {
            kind: EntityKind::Enemy,
            len: enemies.len(),
            capacity: enemies.capacity(),
        });
    }

    for (slot, bullet) in bullets.iter().enumerate() {
        if bullet.is_expired() {
            return Err(InvariantViolation::ExpiredBulletRetained {
                slot,
                age: bullet.age,
            });
        }
    }

    let mut seen = HashSet::with_capacity(enemies.len());
    for (slot, enemy) in enemies.iter().enumerate() {
        if !seen.insert(enemy.id) {
            return Err(InvariantViolation::DuplicateEnemyId { enemy: enemy.id });
        }
        let mapped = enemies.slot_of(enemy.id);
        if mapped != Some(slot) {
            return Err(InvariantViolation::SlotMapMismatch {
                enemy: enemy.id,
                mapped,
                actual: slot,
            });
        }
        if !enemy.is_alive() {
            return Err(InvariantViolation::DeadEnemyRetained {
                enemy: enemy.id,
                health: enemy.health,
            });
        }
    }

    let mapped = enemies.slot_map().len();
    if mapped != enemies.len() {
        return Err(InvariantViolation::SlotMapSize {
            mapped,
            live: enemies.len(),
        });
    }
    Ok(())
}
