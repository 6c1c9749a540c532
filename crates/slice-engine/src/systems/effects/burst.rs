//! Effect bursts shared by the player, enemies and projectiles.

use std::f32::consts::PI;

use glam::Vec2;

use crate::api::context::WorldContext;
use crate::api::types::Sfx;
use crate::systems::effects::particle::{CoinFlight, ParticleKind};
use crate::systems::effects::spark::Spark;

pub const HIT_SCREENSHAKE: f32 = 16.0;
const EXPLOSION_PIECES: usize = 30;
const RING_PIECES: usize = 20;
/// Highest starting frame for dust spawned by bursts.
const DUST_MAX_FRAME: u32 = 7;

/// Sparks fanned around `heading`, each within ±0.5 rad.
pub fn spark_fan(ctx: &mut impl WorldContext, pos: Vec2, heading: f32, count: usize) {
    for _ in 0..count {
        let angle = ctx.random() - 0.5 + heading;
        let speed = 2.0 + ctx.random();
        ctx.spawn_spark(Spark::new(pos, angle, speed));
    }
}

/// 30 sparks flying out, each paired with a dust particle thrown the
/// opposite way.
pub fn explosion(ctx: &mut impl WorldContext, center: Vec2) {
    for _ in 0..EXPLOSION_PIECES {
        let angle = ctx.rng().angle();
        let speed = ctx.random() * 5.0;
        let spark_speed = 2.0 + ctx.random();
        ctx.spawn_spark(Spark::new(center, angle, spark_speed));
        let frame = ctx.rng().range_inclusive(0, DUST_MAX_FRAME);
        let velocity = Vec2::from_angle(angle + PI) * speed * 0.5;
        ctx.spawn_particle_of(ParticleKind::Dust, center, velocity, frame);
    }
}

/// 20 slow dust particles in a ring, marking a dash starting or ending.
pub fn dust_ring(ctx: &mut impl WorldContext, center: Vec2) {
    for _ in 0..RING_PIECES {
        let angle = ctx.rng().angle();
        let speed = ctx.random() * 0.5 + 0.5;
        let frame = ctx.rng().range_inclusive(0, DUST_MAX_FRAME);
        ctx.spawn_particle_of(ParticleKind::Dust, center, Vec2::from_angle(angle) * speed, frame);
    }
}

/// One dust particle trailing a dash. `direction` is ±1.
pub fn dash_trail(ctx: &mut impl WorldContext, center: Vec2, direction: f32) {
    let velocity = Vec2::new(direction * ctx.random() * 3.0, 0.0);
    let frame = ctx.rng().range_inclusive(0, DUST_MAX_FRAME);
    ctx.spawn_particle_of(ParticleKind::Dust, center, velocity, frame);
}

/// Shake, hit sound, blood and an explosion at `center`.
pub fn hit_reaction(ctx: &mut impl WorldContext, center: Vec2) {
    ctx.raise_screenshake(HIT_SCREENSHAKE);
    ctx.play_sound(Sfx::Hit);
    ctx.spawn_particle_of(ParticleKind::Blood, center, Vec2::ZERO, 0);
    explosion(ctx, center);
}

/// Coins released at random angles from `center`.
pub fn coin_drop(ctx: &mut impl WorldContext, center: Vec2, count: usize) {
    for _ in 0..count {
        let angle = ctx.rng().angle();
        let kind = ParticleKind::Coin(CoinFlight::new(center, angle));
        ctx.spawn_particle_of(kind, center, Vec2::ZERO, 0);
    }
}
