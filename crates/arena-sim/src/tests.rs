//! Tests for the engine, fire control, collision, and screen flow.

use glam::{Vec2, Vec3};

use arena_core::components::{Bullet, Enemy};
use arena_core::constants::*;
use arena_core::enums::*;
use arena_core::events::SimEvent;
use arena_core::input::InputSnapshot;

use crate::config::{ConfigError, SimConfig};
use crate::engine::ArenaEngine;

fn empty_engine() -> ArenaEngine {
    ArenaEngine::new(SimConfig::empty_arena()).unwrap()
}

fn neutral() -> InputSnapshot {
    InputSnapshot::default()
}

fn fire() -> InputSnapshot {
    InputSnapshot {
        fire_button: true,
        ..Default::default()
    }
}

fn still_enemy(x: f32, z: f32) -> Enemy {
    Enemy {
        position: Vec3::new(x, ENEMY_SPAWN_Y, z),
        direction: Vec3::ZERO,
        speed: 0.0,
        ..Default::default()
    }
}

fn still_bullet(x: f32, z: f32, damage: f32) -> Bullet {
    Bullet {
        position: Vec3::new(x, 1.0, z),
        direction: Vec3::X,
        speed: 0.0,
        damage,
        ..Default::default()
    }
}

fn count_shots(events: &[SimEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SimEvent::ShotFired { .. }))
        .count()
}

/// Scripted input that sweeps the aim and strafes, firing throughout.
fn sweeping_input(frame: u32) -> InputSnapshot {
    let t = frame as f32 * 0.05;
    InputSnapshot {
        left_axis: Vec2::new((t * 0.3).sin(), (t * 0.2).cos()) * 0.5,
        right_axis: Vec2::new(t.cos(), t.sin()),
        trigger_right: 1.0,
        ..Default::default()
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = ArenaEngine::new(config.clone()).unwrap();
    let mut engine_b = ArenaEngine::new(config).unwrap();
    engine_a.set_screen(GameScreen::Gameplay);
    engine_b.set_screen(GameScreen::Gameplay);

    for frame in 0..300 {
        let input = sweeping_input(frame);
        let snap_a = engine_a.tick(&input, DT);
        let snap_b = engine_b.tick(&input, DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_different_seeds_spawn_differently() {
    let a = ArenaEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let b = ArenaEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();
    let pa: Vec<Vec3> = a.enemies().iter().map(|e| e.position).collect();
    let pb: Vec<Vec3> = b.enemies().iter().map(|e| e.position).collect();
    assert_ne!(pa, pb);
}

// ---- Setup ----

#[test]
fn test_initial_batch_fills_pool() {
    let engine = ArenaEngine::new(SimConfig::default()).unwrap();
    assert_eq!(engine.enemies().len(), MAX_ENEMIES);
    assert_eq!(engine.screen(), GameScreen::Title);
    for enemy in engine.enemies().iter() {
        assert_eq!(enemy.position.y, ENEMY_SPAWN_Y);
        assert!(enemy.position.x.abs() <= ENEMY_SPAWN_SPREAD as f32);
        assert!(enemy.position.z.abs() <= ENEMY_SPAWN_SPREAD as f32);
        assert!((enemy.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(enemy.direction.y, 0.0);
    }
    engine.validate().unwrap();
}

#[test]
fn test_oversized_batch_is_truncated() {
    let mut engine = ArenaEngine::new(SimConfig {
        enemy_count: 10,
        max_enemies: 4,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(engine.enemies().len(), 4);

    let snapshot = engine.tick(&neutral(), DT);
    let dropped = snapshot
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SimEvent::SpawnDropped {
                    kind: EntityKind::Enemy
                }
            )
        })
        .count();
    assert_eq!(dropped, 6);
}

// ---- Config ----

#[test]
fn test_config_rejects_zero_capacity() {
    let result = ArenaEngine::new(SimConfig {
        max_bullets: 0,
        ..Default::default()
    });
    assert_eq!(
        result.err(),
        Some(ConfigError::ZeroCapacity {
            field: "max_bullets"
        })
    );
}

#[test]
fn test_config_rejects_bad_dead_zone() {
    let config = SimConfig {
        aim_dead_zone: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange {
            field: "aim_dead_zone",
            ..
        })
    ));
    let config = SimConfig {
        aim_dead_zone: f32::NAN,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_partial_json_uses_defaults() {
    let config: SimConfig =
        serde_json::from_str(r#"{ "seed": 9, "hit_policy": "consume" }"#).unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.hit_policy, HitPolicy::Consume);
    assert_eq!(config.max_bullets, MAX_BULLETS);
    assert_eq!(config.collision_mode, CollisionMode::Indexed);
}

// ---- Player ----

#[test]
fn test_player_moves_with_left_stick() {
    let mut engine = empty_engine();
    let input = InputSnapshot {
        left_axis: Vec2::new(1.0, -0.5),
        ..Default::default()
    };
    engine.step(&input, 0.5);
    let p = engine.player().position;
    assert!((p.x - PLAYER_SPEED * 0.5).abs() < 1e-4);
    assert!((p.z + PLAYER_SPEED * 0.25).abs() < 1e-4);
    assert_eq!(p.y, PLAYER_SIZE / 2.0);
}

#[test]
fn test_aim_persists_inside_dead_zone() {
    let mut engine = empty_engine();
    engine.step(
        &InputSnapshot {
            right_axis: Vec2::new(0.0, 0.8),
            ..Default::default()
        },
        DT,
    );
    let aimed = engine.player().aim;
    assert!((aimed - Vec3::Z).length() < 1e-6);

    engine.step(
        &InputSnapshot {
            right_axis: Vec2::new(0.01, -0.02),
            ..Default::default()
        },
        DT,
    );
    assert_eq!(engine.player().aim, aimed, "Stick inside dead zone keeps last aim");
}

#[test]
fn test_nan_input_does_not_panic() {
    let mut engine = ArenaEngine::new(SimConfig {
        enemy_count: 50,
        ..Default::default()
    })
    .unwrap();
    let input = InputSnapshot {
        left_axis: Vec2::new(f32::NAN, 0.0),
        right_axis: Vec2::new(f32::NAN, f32::NAN),
        trigger_right: f32::NAN,
        ..Default::default()
    };
    for _ in 0..5 {
        engine.step(&input, DT);
    }
    assert!(engine.player().position.x.is_nan());
    assert!(!engine.player().aim.is_nan(), "NaN stick is treated as released");
}

// ---- Fire control ----

#[test]
fn test_gun_fires_every_shot_duration_plus_one() {
    let mut engine = empty_engine();
    let mut shot_frames = Vec::new();
    for frame in 0..40 {
        engine.step(&fire(), DT);
        if count_shots(&engine.take_events()) > 0 {
            shot_frames.push(frame);
        }
    }
    let period = GUN_SHOT_DURATION as usize + 1;
    assert_eq!(shot_frames, vec![period, 2 * period, 3 * period, 4 * period]);
}

#[test]
fn test_gun_release_resets_counter() {
    let mut engine = empty_engine();
    for _ in 0..5 {
        engine.step(&fire(), DT);
    }
    assert!(engine.gun().trigger_down);
    assert_eq!(engine.gun().current_time, 4);

    engine.step(&neutral(), DT);
    assert!(!engine.gun().trigger_down);
    assert_eq!(engine.gun().current_time, 0);

    // Pressing again starts a full wait.
    let mut shots = 0;
    for _ in 0..GUN_SHOT_DURATION + 1 {
        engine.step(&fire(), DT);
        shots += count_shots(&engine.take_events());
    }
    assert_eq!(shots, 0);
    engine.step(&fire(), DT);
    assert_eq!(count_shots(&engine.take_events()), 1);
}

#[test]
fn test_trigger_axis_fires() {
    let mut engine = empty_engine();
    let input = InputSnapshot {
        trigger_right: 0.9,
        ..Default::default()
    };
    for _ in 0..=GUN_SHOT_DURATION + 1 {
        engine.step(&input, DT);
    }
    assert_eq!(engine.bullets().len(), 1);
}

#[test]
fn test_bullet_uses_aim_and_barrel() {
    let mut engine = empty_engine();
    engine.player_mut().position = Vec3::new(4.0, 1.0, -2.0);
    let input = InputSnapshot::firing(Vec2::new(0.0, -1.0));
    for _ in 0..=GUN_SHOT_DURATION + 1 {
        engine.step(&input, DT);
    }
    let bullet = engine.bullets().as_slice()[0];
    assert!((bullet.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    assert_eq!(engine.gun().barrel_exit, engine.player().position);
    // Spawned at the barrel, then moved once in the same frame.
    let expected = Vec3::new(4.0, 1.0, -2.0 - BULLET_SPEED * DT);
    assert!((bullet.position - expected).length() < 1e-4);
}

#[test]
fn test_full_bullet_pool_drops_shots() {
    let mut engine = ArenaEngine::new(SimConfig {
        max_bullets: 1,
        ..SimConfig::empty_arena()
    })
    .unwrap();
    let mut dropped = 0;
    for _ in 0..30 {
        engine.step(&fire(), DT);
        dropped += engine
            .take_events()
            .iter()
            .filter(|e| matches!(e, SimEvent::SpawnDropped { .. }))
            .count();
    }
    assert_eq!(engine.bullets().len(), 1);
    assert_eq!(dropped, 2, "Shots at frames 18 and 27 find the pool full");
}

// ---- Bullets ----

#[test]
fn test_bullet_age_counts_frames() {
    let mut engine = empty_engine();
    assert!(engine.spawn_bullet(Bullet {
        direction: Vec3::X,
        ..Default::default()
    }));
    for k in 1..BULLET_MAX_AGE {
        engine.step(&neutral(), DT);
        assert_eq!(engine.bullets().as_slice()[0].age, k);
    }
    engine.step(&neutral(), DT);
    assert!(engine.bullets().is_empty(), "Removed when age reaches the limit");
    assert!(engine
        .take_events()
        .iter()
        .any(|e| matches!(e, SimEvent::BulletExpired { .. })));
}

#[test]
fn test_bullet_at_max_age_does_not_overflow() {
    let mut engine = empty_engine();
    engine.spawn_bullet(Bullet {
        age: u32::MAX,
        ..still_bullet(10.0, 10.0, 1.0)
    });
    engine.step(&neutral(), DT);
    assert!(engine.bullets().is_empty());
}

// ---- Collision ----

#[test]
fn test_overlapping_bullets_stack_damage() {
    let mut engine = empty_engine();
    let id = engine.spawn_enemy(still_enemy(20.0, 0.0)).unwrap();
    for dz in [0.0, 0.5, -0.5] {
        engine.spawn_bullet(still_bullet(20.0, dz, 10.0));
    }
    engine.step(&neutral(), DT);
    let enemy = engine.enemies().get(id).unwrap();
    assert!((enemy.health - (ENEMY_HEALTH - 30.0)).abs() < 1e-4);
}

#[test]
fn test_hit_radius_is_bullet_size_plus_width() {
    let mut engine = empty_engine();
    let near = engine.spawn_enemy(still_enemy(20.0, 0.0)).unwrap();
    let far = engine.spawn_enemy(still_enemy(40.0, 0.0)).unwrap();
    let reach = BULLET_SIZE + ENEMY_WIDTH;
    engine.spawn_bullet(still_bullet(20.0 + reach - 0.01, 0.0, 10.0));
    engine.spawn_bullet(still_bullet(40.0 + reach + 0.01, 0.0, 10.0));
    engine.step(&neutral(), DT);
    assert!(engine.enemies().get(near).unwrap().health < ENEMY_HEALTH);
    assert_eq!(engine.enemies().get(far).unwrap().health, ENEMY_HEALTH);
}

#[test]
fn test_height_is_ignored_by_hit_test() {
    let mut engine = empty_engine();
    let id = engine.spawn_enemy(still_enemy(20.0, 0.0)).unwrap();
    let mut bullet = still_bullet(20.0, 0.0, 10.0);
    bullet.position.y = 500.0;
    engine.spawn_bullet(bullet);
    engine.step(&neutral(), DT);
    assert_eq!(engine.enemies().get(id).unwrap().health, ENEMY_HEALTH - 10.0);
}

#[test]
fn test_pierce_keeps_bullet() {
    let mut engine = empty_engine();
    let id = engine
        .spawn_enemy(Enemy {
            health: 1000.0,
            ..still_enemy(20.0, 0.0)
        })
        .unwrap();
    engine.spawn_bullet(still_bullet(20.0, 0.0, 100.0));
    for _ in 0..3 {
        engine.step(&neutral(), DT);
    }
    assert_eq!(engine.bullets().len(), 1);
    assert_eq!(engine.enemies().get(id).unwrap().health, 700.0);
}

#[test]
fn test_consume_removes_bullet_after_hit() {
    let mut engine = ArenaEngine::new(SimConfig {
        hit_policy: HitPolicy::Consume,
        ..SimConfig::empty_arena()
    })
    .unwrap();
    let a = engine
        .spawn_enemy(Enemy {
            health: 1000.0,
            ..still_enemy(20.0, 0.0)
        })
        .unwrap();
    let b = engine
        .spawn_enemy(Enemy {
            health: 1000.0,
            ..still_enemy(20.0, 0.4)
        })
        .unwrap();
    engine.spawn_bullet(still_bullet(20.0, 0.2, 100.0));
    engine.step(&neutral(), DT);
    assert!(engine.bullets().is_empty());
    // Still damages everything it overlapped in that frame.
    assert_eq!(engine.enemies().get(a).unwrap().health, 900.0);
    assert_eq!(engine.enemies().get(b).unwrap().health, 900.0);
}

#[test]
fn test_killed_enemy_is_removed_same_frame() {
    let mut engine = empty_engine();
    let doomed = engine.spawn_enemy(still_enemy(20.0, 0.0)).unwrap();
    let survivor = engine.spawn_enemy(still_enemy(-20.0, 0.0)).unwrap();
    engine.spawn_bullet(still_bullet(20.0, 0.0, ENEMY_HEALTH));
    engine.step(&neutral(), DT);

    assert!(engine.enemies().get(doomed).is_none());
    assert!(engine.enemies().get(survivor).is_some());
    assert_eq!(engine.enemies().len(), 1);
    assert!(engine.take_events().iter().any(
        |e| matches!(e, SimEvent::EnemyDestroyed { enemy, .. } if *enemy == doomed)
    ));
    engine.validate().unwrap();
}

#[test]
fn test_indexed_matches_brute_force() {
    let indexed = SimConfig {
        seed: 7,
        ..Default::default()
    };
    let brute = SimConfig {
        collision_mode: CollisionMode::BruteForce,
        ..indexed.clone()
    };
    let mut engine_a = ArenaEngine::new(indexed).unwrap();
    let mut engine_b = ArenaEngine::new(brute).unwrap();
    engine_a.set_screen(GameScreen::Gameplay);
    engine_b.set_screen(GameScreen::Gameplay);

    let mut hits = 0;
    for frame in 0..600 {
        let input = sweeping_input(frame);
        let snap_a = engine_a.tick(&input, DT);
        let snap_b = engine_b.tick(&input, DT);
        hits += snap_a
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::EnemyHit { .. }))
            .count();
        assert_eq!(
            serde_json::to_string(&snap_a).unwrap(),
            serde_json::to_string(&snap_b).unwrap(),
            "Collision modes diverged at frame {frame}"
        );
    }
    assert!(hits > 0, "Scenario should produce hits");
}

#[test]
fn test_index_holds_each_enemy_once() {
    let mut engine = ArenaEngine::new(SimConfig::default()).unwrap();
    engine.step(&neutral(), DT);
    let tree = engine.index().tree();
    assert!(tree.node_count() > 1, "1024 enemies should split the root");
    assert!(tree.outside().is_empty());
    let root = tree.root().unwrap();
    for enemy in engine.enemies().iter() {
        assert_eq!(tree.bucket_occurrences(enemy.id), 1);
        assert!(tree.held_in_leaf(enemy.id));
        assert!(root.contains(arena_core::math::planar(enemy.position)));
    }
}

// ---- Enemies ----

#[test]
fn test_enemy_contact_damages_player_and_bounces() {
    let mut engine = empty_engine();
    let id = engine
        .spawn_enemy(Enemy {
            position: Vec3::new(1.0, 1.0, 0.0),
            direction: Vec3::new(-1.0, 0.0, 0.0),
            ..Default::default()
        })
        .unwrap();
    engine.step(&neutral(), DT);

    assert_eq!(engine.player().health, PLAYER_HEALTH - ENEMY_CONTACT_DAMAGE);
    let enemy = engine.enemies().get(id).unwrap();
    assert_eq!(enemy.direction, Vec3::new(1.0, 0.0, 0.0));
    assert!(engine
        .take_events()
        .iter()
        .any(|e| matches!(e, SimEvent::PlayerHit { .. })));
}

#[test]
fn test_bounce_leaves_z_direction() {
    let mut engine = empty_engine();
    let id = engine
        .spawn_enemy(Enemy {
            position: Vec3::new(0.5, 1.0, 0.5),
            direction: Vec3::new(-0.6, 0.0, -0.8),
            speed: 0.0,
            ..Default::default()
        })
        .unwrap();
    engine.step(&neutral(), DT);
    let enemy = engine.enemies().get(id).unwrap();
    assert_eq!(enemy.direction, Vec3::new(0.6, 0.0, -0.8));
}

#[test]
fn test_enemy_moves_along_direction() {
    let mut engine = empty_engine();
    let id = engine
        .spawn_enemy(Enemy {
            position: Vec3::new(10.0, 1.0, 0.0),
            direction: Vec3::new(-1.0, 0.0, 0.0),
            speed: 8.0,
            ..Default::default()
        })
        .unwrap();
    engine.step(&neutral(), 1.0 / 60.0);
    let p = engine.enemies().get(id).unwrap().position;
    assert!((p.x - 9.8667).abs() < 1e-3);
    assert_eq!(p.y, 1.0);
    assert_eq!(p.z, 0.0);
}

// ---- Invariants ----

#[test]
fn test_pool_invariants_hold_through_play() {
    let mut engine = ArenaEngine::new(SimConfig {
        seed: 99,
        enemy_count: 300,
        spawn_spread: 30,
        ..Default::default()
    })
    .unwrap();
    engine.set_screen(GameScreen::Gameplay);
    for frame in 0..900 {
        engine.tick(&sweeping_input(frame), DT);
        engine.validate().unwrap();
        assert!(engine.bullets().len() <= engine.bullets().capacity());
    }
    assert!(engine.enemies().len() < 300, "Some enemies should have died");
}

#[test]
fn test_validate_flags_dead_enemy() {
    let mut engine = empty_engine();
    engine.spawn_enemy(Enemy {
        health: 0.0,
        ..still_enemy(5.0, 5.0)
    });
    assert!(engine.validate().is_err());
    engine.step(&neutral(), DT);
    engine.validate().unwrap();
}

// ---- Screens ----

#[test]
fn test_title_confirm_enters_gameplay_without_stepping() {
    let mut engine = ArenaEngine::new(SimConfig {
        enemy_count: 5,
        ..Default::default()
    })
    .unwrap();
    let snap = engine.tick(
        &InputSnapshot {
            confirm_button: true,
            ..Default::default()
        },
        DT,
    );
    assert_eq!(snap.screen, GameScreen::Gameplay);
    assert_eq!(snap.clock.frame, 0);
    assert!(snap.events.contains(&SimEvent::ScreenChanged {
        from: GameScreen::Title,
        to: GameScreen::Gameplay,
    }));

    let snap = engine.tick(&neutral(), DT);
    assert_eq!(snap.clock.frame, 1);
    assert_eq!(snap.enemies.len(), 5);
    assert!(snap.player.is_some());
}

#[test]
fn test_cancel_returns_to_title_and_freezes() {
    let mut engine = ArenaEngine::new(SimConfig {
        enemy_count: 5,
        ..Default::default()
    })
    .unwrap();
    engine.set_screen(GameScreen::Gameplay);
    let snap = engine.tick(
        &InputSnapshot {
            cancel_button: true,
            ..Default::default()
        },
        DT,
    );
    assert_eq!(snap.screen, GameScreen::Title);
    assert_eq!(snap.clock.frame, 1, "The frame that backs out still steps");

    let snap = engine.tick(&fire(), DT);
    assert_eq!(snap.clock.frame, 1);
    assert!(snap.player.is_none());
    assert!(snap.enemies.is_empty());
}

#[test]
fn test_clearing_arena_ends_session() {
    let mut engine = ArenaEngine::new(SimConfig {
        enemy_count: 3,
        ..Default::default()
    })
    .unwrap();
    engine.set_screen(GameScreen::Gameplay);
    engine.player_mut().health = 40.0;
    engine.clear_enemies();

    let snap = engine.tick(&neutral(), DT);
    assert_eq!(snap.screen, GameScreen::Ending);

    let snap = engine.tick(
        &InputSnapshot {
            confirm_button: true,
            ..Default::default()
        },
        DT,
    );
    assert_eq!(snap.screen, GameScreen::Title);
    assert_eq!(engine.enemies().len(), 3, "Fresh batch after the ending");
    assert_eq!(engine.player().health, PLAYER_HEALTH);
    engine.validate().unwrap();
}

#[test]
fn test_snapshot_views_carry_kind_and_color() {
    let mut engine = empty_engine();
    engine.set_screen(GameScreen::Gameplay);
    let id = engine.spawn_enemy(still_enemy(30.0, 30.0)).unwrap();
    engine.spawn_bullet(still_bullet(-30.0, -30.0, 1.0));
    let snap = engine.tick(&neutral(), DT);

    let enemy = &snap.enemies[0];
    assert_eq!(enemy.kind, EntityKind::Enemy);
    assert_eq!(enemy.enemy_id, Some(id));
    assert_eq!(enemy.color, Rgba::RED);
    assert_eq!(enemy.extents, Vec3::new(ENEMY_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH));

    assert_eq!(snap.bullets[0].color, Rgba::YELLOW);
    assert_eq!(snap.player.unwrap().color, Rgba::BLUE);
    assert_eq!(snap.drawable_count(), 3);
}
