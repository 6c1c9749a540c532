//! Clip-driven particles: dust, leaves, blood and homing coins.

use glam::Vec2;

use crate::api::context::WorldContext;
use crate::api::types::Sfx;
use crate::components::animation::Clip;
use crate::components::layer::RenderLayer;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Coin flight phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoinPhase {
    /// Drifting away from the drop point along a fixed angle.
    Outward,
    /// Holding still; ticks remaining.
    Hover(u32),
    /// Flying toward the player.
    Returning,
}

/// Per-coin homing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinFlight {
    pub phase: CoinPhase,
    pub origin: Vec2,
    pub angle: f32,
    pub radius: f32,
}

impl CoinFlight {
    pub const OUTWARD_STEP: f32 = 0.8;
    pub const OUTWARD_RADIUS: f32 = 14.0;
    pub const HOVER_TICKS: u32 = 30;
    pub const RETURN_SPEED: f32 = 3.0;
    pub const CAPTURE_RADIUS: f32 = 3.0;

    pub fn new(origin: Vec2, angle: f32) -> Self {
        Self {
            phase: CoinPhase::Outward,
            origin,
            angle,
            radius: 0.0,
        }
    }

    /// A coin already on its way back.
    pub fn homing(origin: Vec2) -> Self {
        Self {
            phase: CoinPhase::Returning,
            ..Self::new(origin, 0.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Dust,
    Leaf,
    Blood,
    Coin(CoinFlight),
}

/// What a particle update decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleStatus {
    Alive,
    /// Clip ran out.
    Expired,
    /// Coin reached the player.
    Collected,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    /// Center of the particle.
    pub pos: Vec2,
    pub velocity: Vec2,
    pub clip: Clip,
}

impl Particle {
    /// Horizontal sway amplitude for leaves.
    const LEAF_SWAY: f32 = 0.3;
    const LEAF_SWAY_RATE: f32 = 0.035;

    pub fn new(kind: ParticleKind, pos: Vec2, velocity: Vec2, clip: Clip) -> Self {
        Self {
            kind,
            pos,
            velocity,
            clip,
        }
    }

    /// Advance one tick. `target` is the player's center, used by coins.
    pub fn update(&mut self, target: Vec2, ctx: &mut impl WorldContext) -> ParticleStatus {
        if let ParticleKind::Coin(flight) = &mut self.kind {
            self.clip.update();
            return Self::fly_coin(flight, &mut self.pos, target, ctx);
        }

        let expired = self.clip.is_finished();
        self.pos += self.velocity;
        self.clip.update();
        if self.kind == ParticleKind::Leaf {
            self.pos.x += (self.clip.frame() as f32 * Self::LEAF_SWAY_RATE).sin() * Self::LEAF_SWAY;
        }

        if expired {
            ParticleStatus::Expired
        } else {
            ParticleStatus::Alive
        }
    }

    fn fly_coin(
        flight: &mut CoinFlight,
        pos: &mut Vec2,
        target: Vec2,
        ctx: &mut impl WorldContext,
    ) -> ParticleStatus {
        match flight.phase {
            CoinPhase::Outward => {
                flight.radius =
                    (flight.radius + CoinFlight::OUTWARD_STEP).min(CoinFlight::OUTWARD_RADIUS);
                *pos = flight.origin + Vec2::from_angle(flight.angle) * flight.radius;
                if flight.radius >= CoinFlight::OUTWARD_RADIUS {
                    flight.phase = CoinPhase::Hover(CoinFlight::HOVER_TICKS);
                }
            }
            CoinPhase::Hover(0) => flight.phase = CoinPhase::Returning,
            CoinPhase::Hover(ticks) => flight.phase = CoinPhase::Hover(ticks - 1),
            CoinPhase::Returning => {
                let to_target = target - *pos;
                let step = to_target.length().min(CoinFlight::RETURN_SPEED);
                *pos += to_target.normalize_or_zero() * step;
                if pos.distance(target) <= CoinFlight::CAPTURE_RADIUS {
                    ctx.play_sound(Sfx::Coin);
                    return ParticleStatus::Collected;
                }
            }
        }
        ParticleStatus::Alive
    }

    pub fn draw(&self, offset: Vec2, out: &mut RenderBuffer) {
        let image = self.clip.current_image();
        let half = (image.size() / 2.0).floor();
        out.push(
            RenderLayer::Particles,
            RenderInstance::new(image, self.pos - offset - half, false),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingContext;

    #[test]
    fn dust_expires_the_tick_after_its_clip_finishes() {
        let mut ctx = RecordingContext::new();
        // The test dust clip is 2 images x 3 ticks.
        let mut p = Particle::new(
            ParticleKind::Dust,
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            ctx.catalog.particles.dust.fresh(),
        );
        let mut alive_ticks = 0;
        while p.update(Vec2::ZERO, &mut ctx) == ParticleStatus::Alive {
            alive_ticks += 1;
        }
        assert_eq!(alive_ticks, 5);
        assert_eq!(p.pos.x, 6.0);
    }

    #[test]
    fn leaf_sways_horizontally() {
        let mut ctx = RecordingContext::new();
        let clip = ctx.catalog.particles.leaf.fresh().with_frame(40);
        let mut p = Particle::new(ParticleKind::Leaf, Vec2::ZERO, Vec2::new(-0.1, 0.3), clip);
        p.update(Vec2::ZERO, &mut ctx);
        let sway = (41.0f32 * 0.035).sin() * 0.3;
        assert!((p.pos.x - (-0.1 + sway)).abs() < 1e-5);
        assert!((p.pos.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn homing_coin_at_target_is_collected_once() {
        let mut ctx = RecordingContext::new();
        let target = Vec2::new(50.0, 50.0);
        let mut coin = Particle::new(
            ParticleKind::Coin(CoinFlight::homing(target)),
            target,
            Vec2::ZERO,
            ctx.catalog.particles.coin.fresh(),
        );
        assert_eq!(coin.update(target, &mut ctx), ParticleStatus::Collected);
        assert_eq!(ctx.sounds, vec![Sfx::Coin]);
    }

    #[test]
    fn coin_runs_all_phases() {
        let mut ctx = RecordingContext::new();
        let origin = Vec2::new(0.0, 0.0);
        let target = Vec2::new(100.0, 0.0);
        let mut coin = Particle::new(
            ParticleKind::Coin(CoinFlight::new(origin, std::f32::consts::PI)),
            origin,
            Vec2::ZERO,
            ctx.catalog.particles.coin.fresh(),
        );

        let mut ticks = 0;
        let mut saw_hover = false;
        loop {
            ticks += 1;
            assert!(ticks < 200, "coin never arrived");
            if let ParticleKind::Coin(CoinFlight { phase: CoinPhase::Hover(_), .. }) = coin.kind {
                saw_hover = true;
                assert!((coin.pos.x + 14.0).abs() < 1e-4);
            }
            if coin.update(target, &mut ctx) == ParticleStatus::Collected {
                break;
            }
        }
        assert!(saw_hover);
        assert_eq!(ctx.sounds.iter().filter(|s| **s == Sfx::Coin).count(), 1);
    }

    #[test]
    fn draw_centers_image() {
        let ctx = RecordingContext::new();
        let p = Particle::new(
            ParticleKind::Dust,
            Vec2::new(20.0, 20.0),
            Vec2::ZERO,
            ctx.catalog.particles.dust.fresh(),
        );
        let mut out = RenderBuffer::new();
        p.draw(Vec2::new(10.0, 0.0), &mut out);
        // Dust images are 4x4.
        assert_eq!(out.instances[0].x, 8.0);
        assert_eq!(out.instances[0].y, 18.0);
        assert_eq!(out.batches[0].layer, RenderLayer::Particles);
    }
}
