use glam::Vec2;

use crate::api::context::WorldContext;
use crate::components::layer::RenderLayer;
use crate::components::sprite::Image;
use crate::components::tilemap::TileQuery;
use crate::entities::player::Player;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::effects::burst;

/// Enemy bullet. Collides as a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub age: u32,
    pub max_age: u32,
}

impl Projectile {
    pub const DEFAULT_MAX_AGE: u32 = 360;
    const IMPACT_SPARKS: usize = 4;

    pub fn new(pos: Vec2, velocity: Vec2) -> Self {
        Self {
            pos,
            velocity,
            age: 0,
            max_age: Self::DEFAULT_MAX_AGE,
        }
    }

    /// Advance one tick and resolve hits. Returns false when the projectile
    /// is gone: it struck a tile, expired, or hit the player.
    pub fn update(
        &mut self,
        tiles: &impl TileQuery,
        player: &Player,
        ctx: &mut impl WorldContext,
    ) -> bool {
        self.pos += self.velocity;
        self.age += 1;

        if tiles.solid_at(self.pos) {
            let back = (-self.velocity).to_angle();
            burst::spark_fan(ctx, self.pos, back, Self::IMPACT_SPARKS);
            return false;
        }
        if self.age > self.max_age {
            return false;
        }
        if !player.is_invulnerable() && player.body.rect().contains_point(self.pos) {
            ctx.register_death();
            burst::hit_reaction(ctx, player.body.rect().center());
            return false;
        }
        true
    }

    /// Drawn centered on its point.
    pub fn draw(&self, image: Image, offset: Vec2, out: &mut RenderBuffer) {
        let top_left = self.pos - image.size() / 2.0 - offset;
        out.push(
            RenderLayer::Projectiles,
            RenderInstance::new(image, top_left, self.velocity.x < 0.0),
        );
    }
}
