//! Snapshot system: reads the world and builds a RenderSnapshot.
//!
//! This system is read-only: it never modifies the world.

use glam::Vec3;

use arena_core::components::{Bullet, Enemy, Player};
use arena_core::enums::{EntityKind, GameScreen};
use arena_core::events::SimEvent;
use arena_core::state::{EntityView, RenderSnapshot};
use arena_core::types::FrameClock;

use crate::pool::{BulletPool, EnemyPool};

/// Build the snapshot for this frame. The player and entities are only
/// included while on the gameplay screen.
pub fn build_snapshot(
    clock: FrameClock,
    screen: GameScreen,
    player: &Player,
    bullets: &BulletPool,
    enemies: &EnemyPool,
    events: Vec<SimEvent>,
) -> RenderSnapshot {
    let in_game = screen == GameScreen::Gameplay;
    RenderSnapshot {
        clock,
        screen,
        player: in_game.then(|| player_view(player)),
        player_health: player.health,
        aim: player.aim,
        bullets: if in_game {
            bullets.iter().map(bullet_view).collect()
        } else {
            Vec::new()
        },
        enemies: if in_game {
            enemies.iter().map(enemy_view).collect()
        } else {
            Vec::new()
        },
        events,
    }
}

fn player_view(player: &Player) -> EntityView {
    EntityView::new(EntityKind::Player, player.position, Vec3::splat(player.size))
}

fn bullet_view(bullet: &Bullet) -> EntityView {
    EntityView::new(
        EntityKind::Bullet,
        bullet.position,
        Vec3::splat(bullet.size * 2.0),
    )
}

fn enemy_view(enemy: &Enemy) -> EntityView {
    EntityView::new(
        EntityKind::Enemy,
        enemy.position,
        Vec3::new(enemy.width, enemy.height, enemy.width),
    )
    .with_enemy_id(enemy.id)
}
