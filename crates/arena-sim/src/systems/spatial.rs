//! Per-frame spatial index over the enemy pool.

use glam::Vec2;

use arena_core::components::Enemy;
use arena_core::constants::QUADTREE_ROOT_MARGIN;
use arena_core::math::planar;
use arena_core::types::EnemyId;

use crate::pool::EnemyPool;
use crate::quadtree::{Boundary, QuadTree};

/// Quadtree of enemy ids plus the widest enemy, which bounds how far a
/// query must reach to find every possible overlap.
#[derive(Debug, Clone)]
pub struct EnemyIndex {
    tree: QuadTree,
    max_width: f32,
}

impl EnemyIndex {
    pub fn new(capacity: usize, max_depth: u32) -> Self {
        Self {
            tree: QuadTree::new(capacity, max_depth),
            max_width: 0.0,
        }
    }

    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Append ids of enemies that may lie within `reach + enemy width` of `point`.
    pub fn candidates(&self, point: Vec2, reach: f32, out: &mut Vec<EnemyId>) {
        self.tree.query_disk(point, reach + self.max_width, out);
    }
}

/// Rebuild the index from the live enemies.
pub fn rebuild(index: &mut EnemyIndex, enemies: &EnemyPool) {
    let root = Boundary::enclosing(
        enemies.iter().map(|e| planar(e.position)),
        QUADTREE_ROOT_MARGIN,
    );
    index.tree.rebuild(root, enemies.iter().map(|e| (e.id, planar(e.position))));
    index.max_width = enemies
        .iter()
        .map(|e: &Enemy| e.width)
        .filter(|w| w.is_finite())
        .fold(0.0, f32::max);

    tracing::trace!(
        enemies = enemies.len(),
        nodes = index.tree.node_count(),
        depth = index.tree.depth(),
        "enemy index rebuilt"
    );
}
