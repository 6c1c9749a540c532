//! The mutation surface entities get while they update.
//!
//! Entities never hold a reference back to the world. Anything they cause
//! outside themselves (effects, sounds, shake, the player's death) goes
//! through a `WorldContext` passed into each update call.

use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::Sfx;
use crate::assets::catalog::Catalog;
use crate::core::rng::Rng;
use crate::systems::effects::particle::{Particle, ParticleKind};
use crate::systems::effects::projectile::Projectile;
use crate::systems::effects::spark::Spark;

pub trait WorldContext {
    fn catalog(&self) -> &Catalog;

    fn rng(&mut self) -> &mut Rng;

    fn spawn_particle(&mut self, particle: Particle);

    fn spawn_spark(&mut self, spark: Spark);

    fn spawn_projectile(&mut self, projectile: Projectile);

    fn play_sound(&mut self, sfx: Sfx);

    /// Raise screenshake to at least `amount`.
    fn raise_screenshake(&mut self, amount: f32);

    /// 0 while the player is alive.
    fn death_counter(&self) -> u32;

    /// Start (or advance) the death sequence.
    fn register_death(&mut self);

    /// Uniform float in [0, 1).
    fn random(&mut self) -> f32 {
        self.rng().next_f32()
    }

    /// Spawn a particle of `kind` using its catalog clip, starting at `frame`.
    fn spawn_particle_of(&mut self, kind: ParticleKind, pos: Vec2, velocity: Vec2, frame: u32) {
        let clip = self.catalog().particles.get(&kind).fresh().with_frame(frame);
        self.spawn_particle(Particle::new(kind, pos, velocity, clip));
    }
}

/// World-level counters entities may change.
#[derive(Debug, Clone, Default)]
pub struct Status {
    pub screenshake: f32,
    /// Death sequence frame counter. 0 = alive.
    pub dead: u32,
}

/// The live context handed to entities during `World::update`.
pub struct FrameContext<'a> {
    pub engine: &'a mut EngineContext,
    pub status: &'a mut Status,
    pub catalog: &'a Catalog,
}

impl WorldContext for FrameContext<'_> {
    fn catalog(&self) -> &Catalog {
        self.catalog
    }

    fn rng(&mut self) -> &mut Rng {
        &mut self.engine.effects.rng
    }

    fn spawn_particle(&mut self, particle: Particle) {
        self.engine.effects.particles.push(particle);
    }

    fn spawn_spark(&mut self, spark: Spark) {
        self.engine.effects.sparks.push(spark);
    }

    fn spawn_projectile(&mut self, projectile: Projectile) {
        self.engine.effects.projectiles.push(projectile);
    }

    fn play_sound(&mut self, sfx: Sfx) {
        self.engine.emit_sound(sfx.into());
    }

    fn raise_screenshake(&mut self, amount: f32) {
        self.status.screenshake = self.status.screenshake.max(amount);
    }

    fn death_counter(&self) -> u32 {
        self.status.dead
    }

    fn register_death(&mut self) {
        self.status.dead += 1;
        log::debug!("player hit, death counter {}", self.status.dead);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn frame_context_routes_into_engine() {
        let catalog = testing::catalog();
        let mut engine = EngineContext::with_seed(1);
        let mut status = Status::default();
        let mut ctx = FrameContext {
            engine: &mut engine,
            status: &mut status,
            catalog: &catalog,
        };

        ctx.play_sound(Sfx::Hit);
        ctx.raise_screenshake(16.0);
        ctx.raise_screenshake(4.0);
        ctx.register_death();
        ctx.spawn_spark(Spark::new(Vec2::ZERO, 0.0, 2.0));
        ctx.spawn_particle_of(ParticleKind::Dust, Vec2::ZERO, Vec2::X, 3);

        assert_eq!(ctx.death_counter(), 1);
        assert_eq!(status.screenshake, 16.0);
        assert_eq!(engine.sounds.len(), 1);
        assert_eq!(engine.effects.sparks.len(), 1);
        assert_eq!(engine.effects.particles[0].clip.frame(), 3);
    }
}
