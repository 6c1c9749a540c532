//! The frame orchestrator.
//!
//! `World` owns the level, the player and the enemies; the transient
//! effects live in `EngineContext::effects`. One `update` runs the whole
//! tick in a fixed order: enemies, then the player, then projectiles
//! (which must see the player's post-move box), then sparks and particles.
//! Removals are collected during each pass and compacted after it.

pub mod level;

pub use level::{Level, Spawner};

use glam::Vec2;

use crate::api::context::{FrameContext, Status, WorldContext};
use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::api::types::{GameEvent, Sfx};
use crate::assets::catalog::Catalog;
use crate::assets::error::AssetError;
use crate::components::layer::RenderLayer;
use crate::components::tilemap::Tilemap;
use crate::core::rect::Rect;
use crate::core::rng::Rng;
use crate::entities::enemy::Enemy;
use crate::entities::player::Player;
use crate::input::controls::{Command, Controls, MovementAxis};
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::effects::{EffectsState, ParticleKind, ParticleStatus};
use crate::systems::parallax::Clouds;

/// Length of the iris close/open in ticks.
pub const TRANSITION_TICKS: i32 = 30;
/// Death ticks before the iris starts closing.
pub const DEATH_IRIS_START: u32 = 10;
/// Death ticks after which the level restarts.
pub const DEATH_RELOAD: u32 = 40;
/// Iris radius shrink per transition tick, in pixels.
pub const IRIS_STEP: f32 = 8.0;
/// A tree drops a leaf when `random * LEAF_ODDS` is below its canopy area.
pub const LEAF_ODDS: f32 = 49999.0;
pub const LEAF_VELOCITY: Vec2 = Vec2::new(-0.1, 0.3);
pub const LEAF_MAX_FRAME: u32 = 20;
const CLOUD_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct World {
    catalog: Catalog,
    levels: Vec<Level>,
    level: usize,
    tilemap: Tilemap,
    leaf_spawners: Vec<Rect>,
    player: Player,
    enemies: Vec<Enemy>,
    camera: Camera2D,
    clouds: Clouds,
    status: Status,
    /// Negative while the iris opens after a load, positive while it closes.
    transition: i32,
    coins: u32,
    movement: MovementAxis,
    controls: Controls,
    /// Composite offset sampled at the end of each update.
    shake_offset: Vec2,
    config: GameConfig,
}

impl World {
    /// Build a world on level 0. Nothing is spawned into the engine until
    /// `load_level` (or `Game::init`) runs.
    pub fn new(
        catalog: Catalog,
        levels: Vec<Level>,
        config: GameConfig,
    ) -> Result<Self, AssetError> {
        let first = levels.first().ok_or(AssetError::NoLevels)?;
        let tilemap = first.tilemap.clone();
        let mut cloud_rng = Rng::new(config.seed ^ CLOUD_SALT);
        let clouds = Clouds::new(&catalog.clouds, Clouds::DEFAULT_COUNT, &mut cloud_rng);
        let player = Player::new(first.player_spawn().unwrap_or(Vec2::ZERO), &catalog);
        let camera = Camera2D::new(config.display_width, config.display_height);

        Ok(Self {
            catalog,
            levels,
            level: 0,
            tilemap,
            leaf_spawners: Vec::new(),
            player,
            enemies: Vec::new(),
            camera,
            clouds,
            status: Status::default(),
            transition: -TRANSITION_TICKS,
            coins: 0,
            movement: MovementAxis::default(),
            controls: Controls::default(),
            shake_offset: Vec2::ZERO,
            config,
        })
    }

    /// Reset the world to level `index`. Out-of-range indices load the last level.
    pub fn load_level(&mut self, index: usize, ctx: &mut EngineContext) {
        let last = self.level_count() - 1;
        if index > last {
            log::warn!("level {} out of range, loading level {}", index, last);
        }
        self.level = index.min(last);
        let level = &self.levels[self.level];

        self.tilemap = level.tilemap.clone();
        self.leaf_spawners = level.trees.clone();
        self.enemies = level
            .enemy_spawns()
            .map(|(pos, weapon)| Enemy::new(pos, &self.catalog).with_weapon(weapon))
            .collect();
        match level.player_spawn() {
            Some(pos) => self.player.respawn(pos),
            None => log::warn!("level {} has no player spawner", self.level),
        }

        ctx.effects.clear();
        self.camera.scroll = Vec2::ZERO;
        self.status.dead = 0;
        self.transition = -TRANSITION_TICKS;

        log::info!(
            "loaded level {} with {} enemies",
            self.level,
            self.enemies.len()
        );
        ctx.emit_event(GameEvent::new(GameEvent::LEVEL_LOADED, self.level as f32));
    }

    /// One fixed tick.
    pub fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.status.screenshake = (self.status.screenshake - 1.0).max(0.0);

        if self.enemies.is_empty() {
            self.transition += 1;
            if self.transition > TRANSITION_TICKS {
                let next = (self.level + 1).min(self.level_count() - 1);
                log::info!("level {} cleared", self.level);
                self.load_level(next, ctx);
            }
        }
        if self.transition < 0 {
            self.transition += 1;
        }

        if self.status.dead > 0 {
            self.status.dead += 1;
            if self.status.dead >= DEATH_IRIS_START {
                self.transition = (self.transition + 1).min(TRANSITION_TICKS);
            }
            if self.status.dead > DEATH_RELOAD {
                self.load_level(self.level, ctx);
            }
        }

        self.camera.follow(self.player.body.rect().center());
        self.clouds.update();

        let mut fx = FrameContext {
            engine: &mut *ctx,
            status: &mut self.status,
            catalog: &self.catalog,
        };

        for canopy in &self.leaf_spawners {
            if fx.random() * LEAF_ODDS < canopy.w * canopy.h {
                let pos = Vec2::new(
                    canopy.x + fx.random() * canopy.w,
                    canopy.y + fx.random() * canopy.h,
                );
                let frame = fx.rng().range_inclusive(0, LEAF_MAX_FRAME);
                fx.spawn_particle_of(ParticleKind::Leaf, pos, LEAF_VELOCITY, frame);
            }
        }

        let deaths_before = fx.death_counter();

        let killed: Vec<bool> = self
            .enemies
            .iter_mut()
            .map(|enemy| enemy.update(&self.tilemap, &self.player, &mut fx))
            .collect();

        if fx.death_counter() == 0 {
            let movement = Vec2::new(self.movement.axis(), 0.0);
            self.player.update(&self.tilemap, movement, &mut fx);
        }

        let mut projectiles = std::mem::take(&mut fx.engine.effects.projectiles);
        projectiles.retain_mut(|p| p.update(&self.tilemap, &self.player, &mut fx));
        projectiles.append(&mut fx.engine.effects.projectiles);
        fx.engine.effects.projectiles = projectiles;

        if fx.death_counter() > deaths_before {
            let dead = fx.death_counter();
            fx.engine.emit_event(GameEvent::new(GameEvent::PLAYER_HIT, dead as f32));
        }

        let enemies_before = self.enemies.len();
        let mut flags = killed.into_iter();
        self.enemies.retain(|_| !flags.next().unwrap_or(false));
        // One event per kill, counting down to the survivors.
        for remaining in (self.enemies.len()..enemies_before).rev() {
            fx.engine.emit_event(GameEvent::new(GameEvent::ENEMY_KILLED, remaining as f32));
        }

        fx.engine.effects.tick_sparks();

        let target = self.player.body.rect().center();
        let mut particles = std::mem::take(&mut fx.engine.effects.particles);
        let mut collected = 0;
        particles.retain_mut(|p| match p.update(target, &mut fx) {
            ParticleStatus::Alive => true,
            ParticleStatus::Expired => false,
            ParticleStatus::Collected => {
                collected += 1;
                false
            }
        });
        particles.append(&mut fx.engine.effects.particles);
        fx.engine.effects.particles = particles;

        if collected > 0 {
            self.coins += collected;
            log::debug!("collected {} coins, total {}", collected, self.coins);
            fx.engine.emit_event(GameEvent::new(GameEvent::COIN_COLLECTED, self.coins as f32));
        }

        for event in input.iter() {
            let Some(command) = self.controls.command(event) else {
                continue;
            };
            if self.movement.apply(command) {
                continue;
            }
            match command {
                Command::Jump => {
                    if self.player.jump() {
                        fx.play_sound(Sfx::Jump);
                    }
                }
                Command::Dash => {
                    self.player.dash(&mut fx);
                }
                Command::MoveLeft(_) | Command::MoveRight(_) => {}
            }
        }

        let shake = self.status.screenshake;
        let rng = &mut ctx.effects.rng;
        self.shake_offset = Vec2::new(
            rng.next_f32() * shake - shake / 2.0,
            rng.next_f32() * shake - shake / 2.0,
        );
    }

    /// Draw the current state. Pure: calling it twice gives the same buffer.
    pub fn draw(&self, effects: &EffectsState, out: &mut RenderBuffer) {
        let offset = self.camera.render_offset();
        let view = self.camera.size();

        out.push(
            RenderLayer::Sky,
            RenderInstance::new(self.catalog.background, Vec2::ZERO, false),
        );
        self.clouds.draw(offset, view, out);
        out.mark_backdrop_end();

        self.tilemap.draw(offset, view, out);
        for enemy in &self.enemies {
            enemy.draw(self.catalog.gun, offset, out);
        }
        if self.status.dead == 0 {
            self.player.draw(offset, out);
        }
        for projectile in &effects.projectiles {
            projectile.draw(self.catalog.projectile, offset, out);
        }
        for spark in &effects.sparks {
            spark.draw(offset, out);
        }
        out.mark_silhouette_end();

        for particle in &effects.particles {
            particle.draw(offset, out);
        }

        if self.transition != 0 {
            out.iris_radius = Some((TRANSITION_TICKS - self.transition.abs()) as f32 * IRIS_STEP);
        }
        out.shake = self.shake_offset;
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// 0 while the player is alive.
    pub fn death_counter(&self) -> u32 {
        self.status.dead
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn screenshake(&self) -> f32 {
        self.status.screenshake
    }

    pub fn transition(&self) -> i32 {
        self.transition
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }
}

impl Game for World {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.emit_sound(Sfx::Ambience.into());
        self.load_level(self.level, ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        World::update(self, ctx, input);
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.draw(&ctx.engine.effects, ctx.render_buffer);
    }
}
