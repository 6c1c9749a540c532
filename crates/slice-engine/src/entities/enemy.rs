//! Patrolling gunners.

use std::f32::consts::PI;

use glam::Vec2;

use crate::api::context::WorldContext;
use crate::api::types::Sfx;
use crate::assets::catalog::Catalog;
use crate::components::layer::RenderLayer;
use crate::components::sprite::Image;
use crate::components::tilemap::TileQuery;
use crate::entities::body::{Action, Body, ACTOR_SIZE};
use crate::entities::player::Player;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::effects::burst;
use crate::systems::effects::projectile::Projectile;
use crate::systems::effects::spark::Spark;

/// What an enemy shoots with.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponKind {
    /// Never fires.
    None,
    /// Single slow bullet straight ahead.
    #[default]
    Basic,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    /// Ticks of patrol left. 0 = standing.
    pub walking: u32,
    pub weapon: WeaponKind,
}

impl Enemy {
    pub const WALK_SPEED: f32 = 0.5;
    /// Chance per idle tick of starting a patrol.
    pub const PATROL_CHANCE: f32 = 0.01;
    pub const PATROL_MIN: u32 = 30;
    pub const PATROL_MAX: u32 = 120;
    /// Ground probe: horizontal reach from center, depth below the top.
    pub const PROBE: Vec2 = Vec2::new(7.0, 23.0);
    /// Vertical distance within which the player can be shot.
    pub const AIM_BAND: f32 = 16.0;
    pub const MUZZLE_REACH: f32 = 7.0;
    pub const PROJECTILE_SPEED: f32 = 1.5;
    pub const MUZZLE_SPARKS: usize = 4;
    /// Gap between the body center and the gun.
    pub const GUN_GAP: f32 = 4.0;
    pub const COIN_DROP: usize = 3;

    pub fn new(pos: Vec2, catalog: &Catalog) -> Self {
        Self {
            body: Body::new(pos, ACTOR_SIZE, &catalog.enemy),
            walking: 0,
            weapon: WeaponKind::default(),
        }
    }

    pub fn with_weapon(mut self, weapon: WeaponKind) -> Self {
        self.weapon = weapon;
        self
    }

    fn facing(&self) -> f32 {
        if self.body.flip {
            -1.0
        } else {
            1.0
        }
    }

    /// One tick. Returns true when the dashing player killed this enemy;
    /// the caller removes it once the tick is fully resolved.
    pub fn update(
        &mut self,
        tiles: &impl TileQuery,
        player: &Player,
        ctx: &mut impl WorldContext,
    ) -> bool {
        let mut movement = Vec2::ZERO;
        if self.walking > 0 {
            let rect = self.body.rect();
            let probe = Vec2::new(
                rect.center().x + Self::PROBE.x * self.facing(),
                self.body.pos.y + Self::PROBE.y,
            );
            if tiles.solid_at(probe) {
                if self.body.collisions.horizontal() {
                    self.body.flip = !self.body.flip;
                } else {
                    movement.x = Self::WALK_SPEED * self.facing();
                }
            } else {
                self.body.flip = !self.body.flip;
            }
            self.walking -= 1;
            if self.walking == 0 {
                self.try_fire(player, ctx);
            }
        } else if ctx.random() < Self::PATROL_CHANCE {
            self.walking = ctx.rng().range_inclusive(Self::PATROL_MIN, Self::PATROL_MAX);
        }

        self.body.integrate(tiles, movement);
        self.body.set_action(if movement.x != 0.0 {
            Action::Run
        } else {
            Action::Idle
        });

        self.check_dash_hit(player, ctx)
    }

    /// Shoot if the player is level with this enemy and in front of it.
    fn try_fire(&self, player: &Player, ctx: &mut impl WorldContext) {
        if self.weapon == WeaponKind::None {
            return;
        }
        let dis = player.body.pos - self.body.pos;
        if dis.y.abs() >= Self::AIM_BAND {
            return;
        }
        let facing_player = if self.body.flip { dis.x < 0.0 } else { dis.x > 0.0 };
        if facing_player {
            self.fire(ctx);
        }
    }

    fn fire(&self, ctx: &mut impl WorldContext) {
        let direction = self.facing();
        let center = self.body.rect().center();
        let muzzle = Vec2::new(center.x + Self::MUZZLE_REACH * direction, center.y);
        ctx.play_sound(Sfx::Shoot);
        ctx.spawn_projectile(Projectile::new(
            muzzle,
            Vec2::new(Self::PROJECTILE_SPEED * direction, 0.0),
        ));
        let heading = if direction < 0.0 { PI } else { 0.0 };
        burst::spark_fan(ctx, muzzle, heading, Self::MUZZLE_SPARKS);
    }

    fn check_dash_hit(&self, player: &Player, ctx: &mut impl WorldContext) -> bool {
        if !player.is_invulnerable() || !self.body.rect().overlaps(&player.body.rect()) {
            return false;
        }
        let center = self.body.rect().center();
        burst::hit_reaction(ctx, center);
        for angle in [0.0, PI] {
            let speed = 5.0 + ctx.random();
            ctx.spawn_spark(Spark::new(center, angle, speed));
        }
        burst::coin_drop(ctx, center, Self::COIN_DROP);
        log::debug!("enemy at {:?} killed by dash", self.body.pos);
        true
    }

    /// Body plus the gun held on the facing side.
    pub fn draw(&self, gun: Image, offset: Vec2, out: &mut RenderBuffer) {
        self.body.draw(offset, out);
        let center = self.body.rect().center();
        let x = if self.body.flip {
            center.x - Self::GUN_GAP - gun.width
        } else {
            center.x + Self::GUN_GAP
        };
        out.push(
            RenderLayer::Actors,
            RenderInstance::new(gun, Vec2::new(x, center.y) - offset, self.body.flip),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::effects::particle::ParticleKind;
    use crate::testing::{self, RecordingContext};

    /// Enemy and player both standing on the row-8 floor (y = 113).
    fn setup(ctx: &RecordingContext, enemy_x: f32, player_x: f32) -> (Enemy, Player) {
        let enemy = Enemy::new(Vec2::new(enemy_x, 113.0), &ctx.catalog);
        let player = Player::new(Vec2::new(player_x, 113.0), &ctx.catalog);
        (enemy, player)
    }

    #[test]
    fn fires_once_when_patrol_ends_facing_player() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 100.0, 200.0);
        enemy.walking = 1;

        let killed = enemy.update(&map, &player, &mut ctx);

        assert!(!killed);
        assert_eq!(enemy.walking, 0);
        assert_eq!(ctx.projectiles.len(), 1);
        assert_eq!(ctx.count_sound(Sfx::Shoot), 1);
        assert_eq!(ctx.sparks.len(), 4);
        let shot = &ctx.projectiles[0];
        assert_eq!(shot.velocity, Vec2::new(1.5, 0.0));
        assert_eq!(shot.pos, Vec2::new(111.0, 120.5));
    }

    #[test]
    fn fire_waits_for_patrol_to_end() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 100.0, 200.0);
        enemy.walking = 10;

        for _ in 0..9 {
            enemy.update(&map, &player, &mut ctx);
            assert!(ctx.projectiles.is_empty());
        }
        assert_eq!(enemy.walking, 1);

        enemy.update(&map, &player, &mut ctx);
        assert_eq!(enemy.walking, 0);
        assert_eq!(ctx.projectiles.len(), 1);
        assert_eq!(ctx.count_sound(Sfx::Shoot), 1);
    }

    #[test]
    fn fires_left_when_flipped() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 200.0, 100.0);
        enemy.body.flip = true;
        enemy.walking = 1;

        enemy.update(&map, &player, &mut ctx);

        assert_eq!(ctx.projectiles.len(), 1);
        assert_eq!(ctx.projectiles[0].velocity.x, -1.5);
        assert!(ctx.sparks.iter().all(|s| (s.angle - PI).abs() <= 0.5));
    }

    #[test]
    fn holds_fire_when_facing_away() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 100.0, 50.0);
        enemy.walking = 1;
        enemy.update(&map, &player, &mut ctx);
        assert!(ctx.projectiles.is_empty());
        assert!(ctx.sounds.is_empty());
    }

    #[test]
    fn holds_fire_outside_aim_band() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, mut player) = setup(&ctx, 100.0, 200.0);
        player.body.pos.y = 113.0 - 16.0;
        enemy.walking = 1;
        enemy.update(&map, &player, &mut ctx);
        assert!(ctx.projectiles.is_empty());
    }

    #[test]
    fn unarmed_enemy_never_fires() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (enemy, player) = setup(&ctx, 100.0, 200.0);
        let mut enemy = enemy.with_weapon(WeaponKind::None);
        enemy.walking = 1;
        enemy.update(&map, &player, &mut ctx);
        assert!(ctx.projectiles.is_empty());
    }

    #[test]
    fn patrol_walks_forward_on_solid_ground() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 100.0, 400.0);
        enemy.walking = 10;

        enemy.update(&map, &player, &mut ctx);

        assert_eq!(enemy.body.pos.x, 100.5);
        assert_eq!(enemy.body.action(), Action::Run);
        assert_eq!(enemy.walking, 9);
    }

    #[test]
    fn turns_around_at_cliff_edge() {
        let mut ctx = RecordingContext::new();
        // Floor only under columns 0..=6 (x < 112); the probe lands at x = 112.
        let mut map = testing::floor_map(30, 10, 8);
        map.fill_rect(7, 8, 23, 1, None);
        let (mut enemy, player) = setup(&ctx, 101.0, 400.0);
        enemy.walking = 10;

        enemy.update(&map, &player, &mut ctx);

        assert!(enemy.body.flip);
        assert_eq!(enemy.body.pos.x, 101.0);
        assert_eq!(enemy.body.action(), Action::Idle);
    }

    #[test]
    fn turns_around_after_hitting_wall() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 100.0, 400.0);
        enemy.walking = 10;
        enemy.body.collisions.right = true;

        enemy.update(&map, &player, &mut ctx);

        assert!(enemy.body.flip);
        assert_eq!(enemy.body.pos.x, 100.0);
    }

    #[test]
    fn idle_enemy_eventually_patrols() {
        let mut ctx = RecordingContext::with_seed(3);
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, player) = setup(&ctx, 100.0, 400.0);
        let started = testing::run_until(5000, || {
            enemy.update(&map, &player, &mut ctx);
            enemy.walking > 0
        });
        assert!(started.is_some());
        assert!((30..=120).contains(&enemy.walking));
    }

    #[test]
    fn dashing_player_kills_on_contact() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, mut player) = setup(&ctx, 100.0, 104.0);
        player.dashing = 55;

        assert!(enemy.update(&map, &player, &mut ctx));

        assert_eq!(ctx.screenshake, 16.0);
        assert_eq!(ctx.count_sound(Sfx::Hit), 1);
        // 30 explosion sparks plus the two long ones.
        assert_eq!(ctx.sparks.len(), 32);
        assert!(ctx.sparks[30..].iter().all(|s| s.speed >= 5.0));
        let coins = ctx
            .particles
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Coin(_)))
            .count();
        assert_eq!(coins, 3);
        assert_eq!(ctx.particles[0].kind, ParticleKind::Blood);
    }

    #[test]
    fn contact_without_dash_is_harmless() {
        let mut ctx = RecordingContext::new();
        let map = testing::floor_map(30, 10, 8);
        let (mut enemy, mut player) = setup(&ctx, 100.0, 104.0);
        player.dashing = 49;
        assert!(!enemy.update(&map, &player, &mut ctx));
        assert!(ctx.sparks.is_empty());
        assert_eq!(ctx.dead, 0);
    }

    #[test]
    fn gun_sits_on_facing_side() {
        let ctx = RecordingContext::new();
        let (mut enemy, _) = setup(&ctx, 100.0, 0.0);
        let gun = ctx.catalog.gun;
        let mut out = RenderBuffer::new();
        enemy.draw(gun, Vec2::ZERO, &mut out);
        assert_eq!(out.instances[1].x, 108.0);
        assert_eq!(out.instances[1].y, 120.5);

        enemy.body.flip = true;
        let mut out = RenderBuffer::new();
        enemy.draw(gun, Vec2::ZERO, &mut out);
        assert_eq!(out.instances[1].x, 104.0 - 4.0 - 7.0);
        assert_eq!(out.instances[1].flip, 1.0);
    }
}
