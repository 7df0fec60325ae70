//! Simulation engine: the core of the game.
//!
//! `ArenaEngine` owns the player, gun, both pools, and the per-frame
//! spatial index. It consumes one `InputSnapshot` per frame and produces a
//! `RenderSnapshot`. Completely headless, enabling deterministic testing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::{Bullet, Enemy, Gun, Player};
use arena_core::enums::{EntityKind, GameScreen};
use arena_core::events::SimEvent;
use arena_core::input::InputSnapshot;
use arena_core::state::RenderSnapshot;
use arena_core::types::{EnemyId, FrameClock};

use crate::config::{ConfigError, SimConfig};
use crate::invariants::{self, InvariantViolation};
use crate::pool::{BulletPool, EnemyPool};
use crate::systems;
use crate::systems::bullets::BulletPass;
use crate::systems::fire_control::FireOutcome;
use crate::systems::spatial::EnemyIndex;
use crate::world_setup;

/// The simulation engine. Owns all world state.
pub struct ArenaEngine {
    config: SimConfig,
    screen: GameScreen,
    clock: FrameClock,
    rng: ChaCha8Rng,

    player: Player,
    gun: Gun,
    bullets: BulletPool,
    enemies: EnemyPool,
    index: EnemyIndex,

    // Per-frame scratch, kept to avoid reallocating every frame.
    bullet_removals: Vec<usize>,
    enemy_removals: Vec<usize>,
    removed_enemies: Vec<Enemy>,
    candidates: Vec<EnemyId>,
    events: Vec<SimEvent>,
}

impl ArenaEngine {
    /// Create an engine and spawn the initial enemy batch.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            screen: GameScreen::Title,
            clock: FrameClock::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: Player::default(),
            gun: Gun::default(),
            bullets: BulletPool::with_capacity(config.max_bullets),
            enemies: EnemyPool::with_capacity(config.max_enemies),
            index: EnemyIndex::new(config.quadtree_capacity, config.quadtree_max_depth),
            bullet_removals: Vec::with_capacity(config.max_bullets),
            enemy_removals: Vec::with_capacity(config.max_enemies),
            removed_enemies: Vec::with_capacity(config.max_enemies),
            candidates: Vec::new(),
            events: Vec::new(),
            config,
        };
        engine.reset_world();
        Ok(engine)
    }

    /// Handle screen input, advance one frame if in gameplay, and return
    /// the resulting snapshot.
    ///
    /// The world only advances when the frame starts on the gameplay
    /// screen, so the frame that leaves the title screen does not move
    /// anything and the frame that backs out of gameplay still does.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> RenderSnapshot {
        let was_playing = self.screen == GameScreen::Gameplay;
        self.handle_screen_input(input);

        if was_playing {
            self.step(input, dt);
            if self.enemies.is_empty() && self.screen == GameScreen::Gameplay {
                self.change_screen(GameScreen::Ending);
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            self.clock,
            self.screen,
            &self.player,
            &self.bullets,
            &self.enemies,
            events,
        )
    }

    /// Advance the world by one frame regardless of screen.
    ///
    /// Events accumulate until the next `tick` or `take_events`.
    pub fn step(&mut self, input: &InputSnapshot, dt: f32) {
        // 1-2. Player movement and aim
        systems::player::run(&mut self.player, input, dt, self.config.aim_dead_zone);
        // 3. Fire control
        let fire_intent = input.fire_intent_with(self.config.trigger_threshold);
        if systems::fire_control::run(
            &mut self.gun,
            &self.player,
            fire_intent,
            &mut self.bullets,
            &mut self.events,
        ) == FireOutcome::Dropped
        {
            tracing::trace!(frame = self.clock.frame, "bullet pool full, shot dropped");
        }
        // 4. Spatial index
        systems::spatial::rebuild(&mut self.index, &self.enemies);
        // 5. Bullets vs enemies
        systems::bullets::run(
            &mut self.bullets,
            &mut self.enemies,
            BulletPass {
                mode: self.config.collision_mode,
                policy: self.config.hit_policy,
                dt,
                index: &self.index,
                candidates: &mut self.candidates,
                removals: &mut self.bullet_removals,
            },
            &mut self.events,
        );
        // 6. Enemies vs player
        systems::enemies::run(
            &mut self.enemies,
            &mut self.player,
            dt,
            &mut self.enemy_removals,
            &mut self.events,
        );
        // 7. Removals
        systems::cleanup::run(
            &mut self.bullets,
            &mut self.bullet_removals,
            &mut self.enemies,
            &mut self.enemy_removals,
            &mut self.removed_enemies,
            &mut self.events,
        );

        self.clock.advance(dt);
    }

    fn handle_screen_input(&mut self, input: &InputSnapshot) {
        match self.screen {
            GameScreen::Logo | GameScreen::Title if input.confirm_button => {
                self.change_screen(GameScreen::Gameplay);
            }
            GameScreen::Gameplay if input.cancel_button => {
                self.change_screen(GameScreen::Title);
            }
            GameScreen::Ending if input.confirm_button => {
                self.reset_world();
                self.change_screen(GameScreen::Title);
            }
            _ => {}
        }
    }

    fn change_screen(&mut self, to: GameScreen) {
        let from = self.screen;
        if from == to {
            return;
        }
        tracing::debug!(?from, ?to, frame = self.clock.frame, "screen changed");
        self.screen = to;
        self.events.push(SimEvent::ScreenChanged { from, to });
    }

    /// Put the world back to its start-of-session state with a fresh batch
    /// of enemies. The RNG keeps running, so a new batch differs from the last.
    fn reset_world(&mut self) {
        self.player = Player::default();
        self.gun = Gun::default();
        self.bullets.clear();
        self.enemies.clear();
        let spawned = world_setup::spawn_enemy_batch(
            &mut self.enemies,
            &mut self.rng,
            self.config.enemy_count,
            self.config.spawn_spread,
        );
        for _ in spawned..self.config.enemy_count {
            self.events.push(SimEvent::SpawnDropped {
                kind: EntityKind::Enemy,
            });
        }
    }

    /// Spawn an enemy. `None` if the pool is full.
    pub fn spawn_enemy(&mut self, enemy: Enemy) -> Option<EnemyId> {
        let id = self.enemies.spawn(enemy);
        if id.is_none() {
            self.events.push(SimEvent::SpawnDropped {
                kind: EntityKind::Enemy,
            });
        }
        id
    }

    /// Spawn a bullet. `false` if the pool is full.
    pub fn spawn_bullet(&mut self, bullet: Bullet) -> bool {
        let spawned = self.bullets.push(bullet).is_some();
        if !spawned {
            self.events.push(SimEvent::SpawnDropped {
                kind: EntityKind::Bullet,
            });
        }
        spawned
    }

    /// Remove every enemy.
    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }

    /// Jump straight to a screen, bypassing input.
    pub fn set_screen(&mut self, screen: GameScreen) {
        self.change_screen(screen);
    }

    /// Drain events raised since the last tick.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check pool bookkeeping.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        invariants::check(&self.bullets, &self.enemies)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn screen(&self) -> GameScreen {
        self.screen
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access, for scenario setup.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn gun(&self) -> &Gun {
        &self.gun
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn enemies(&self) -> &EnemyPool {
        &self.enemies
    }

    /// The spatial index as built during the last step.
    pub fn index(&self) -> &EnemyIndex {
        &self.index
    }
}
