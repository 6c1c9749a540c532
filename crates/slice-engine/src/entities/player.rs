//! The player: running, jumping, wall slides and the dash.
//!
//! `dashing` is a signed countdown. Its sign is the dash direction and its
//! magnitude runs 60 → 0. Above 50 the dash burst is active (forced
//! velocity, trail, hidden sprite); at or above 50 the player cannot be
//! hurt; below that it is a cooldown.

use glam::Vec2;

use crate::api::context::WorldContext;
use crate::api::types::Sfx;
use crate::assets::catalog::Catalog;
use crate::components::tilemap::TileQuery;
use crate::entities::body::{Action, Body, ACTOR_SIZE};
use crate::renderer::instance::RenderBuffer;
use crate::systems::effects::burst;

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Ticks since the player last stood on something.
    pub air_time: u32,
    /// Extra jumps left (0 or 1).
    pub jumps: u32,
    pub wall_slide: bool,
    pub dashing: i32,
    /// Multiplier on horizontal input.
    pub speed: f32,
}

impl Player {
    pub const SPEED: f32 = 1.5;
    pub const JUMP_VELOCITY: f32 = -4.0;
    pub const WALL_JUMP_PUSH: f32 = 2.7;
    /// Air time after which the jump animation plays and walls can be slid.
    pub const AIRBORNE_TICKS: u32 = 4;
    /// Air time that counts as a fatal fall.
    pub const FATAL_AIR_TIME: u32 = 120;
    pub const WALL_SLIDE_SPEED: f32 = 0.5;
    pub const DASH_TICKS: i32 = 60;
    /// `|dashing|` above this is the active burst.
    pub const DASH_BURST_END: i32 = 50;
    pub const DASH_SPEED: f32 = 8.0;
    pub const FRICTION: f32 = 0.1;

    pub fn new(pos: Vec2, catalog: &Catalog) -> Self {
        Self {
            body: Body::new(pos, ACTOR_SIZE, &catalog.player),
            air_time: 0,
            jumps: 1,
            wall_slide: false,
            dashing: 0,
            speed: Self::SPEED,
        }
    }

    /// Place the player at a level's spawn point.
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.air_time = 0;
    }

    /// Dash burst window: velocity is forced and the sprite is hidden.
    pub fn is_dash_burst(&self) -> bool {
        self.dashing.abs() > Self::DASH_BURST_END
    }

    /// Projectiles pass through and enemies die on contact.
    pub fn is_invulnerable(&self) -> bool {
        self.dashing.abs() >= Self::DASH_BURST_END
    }

    /// One tick. `movement` is the raw input axis.
    pub fn update(&mut self, tiles: &impl TileQuery, movement: Vec2, ctx: &mut impl WorldContext) {
        let movement = Vec2::new(movement.x * self.speed, movement.y);
        self.body.integrate(tiles, movement);

        if !self.wall_slide {
            self.air_time += 1;
        }
        if self.air_time > Self::FATAL_AIR_TIME && ctx.death_counter() == 0 {
            ctx.raise_screenshake(burst::HIT_SCREENSHAKE);
            ctx.register_death();
        }

        if self.body.collisions.down {
            self.air_time = 0;
            self.jumps = 1;
        }

        self.wall_slide = false;
        if self.body.collisions.horizontal() && self.air_time > Self::AIRBORNE_TICKS {
            self.wall_slide = true;
            self.body.velocity.y = self.body.velocity.y.min(Self::WALL_SLIDE_SPEED);
            self.body.flip = !self.body.collisions.right;
            self.body.set_action(Action::WallSlide);
        }

        if !self.wall_slide {
            let action = if self.air_time > Self::AIRBORNE_TICKS {
                Action::Jump
            } else if self.body.last_movement.x != 0.0 {
                Action::Run
            } else {
                Action::Idle
            };
            self.body.set_action(action);
        }

        self.update_dash(ctx);

        let vx = &mut self.body.velocity.x;
        if *vx > 0.0 {
            *vx = (*vx - Self::FRICTION).max(0.0);
        } else {
            *vx = (*vx + Self::FRICTION).min(0.0);
        }
    }

    fn update_dash(&mut self, ctx: &mut impl WorldContext) {
        let center = self.body.rect().center();
        if matches!(self.dashing.abs(), Self::DASH_TICKS | Self::DASH_BURST_END) {
            burst::dust_ring(ctx, center);
        }

        self.dashing -= self.dashing.signum();

        // Nonzero inside the burst window, so the direction is defined.
        if self.is_dash_burst() {
            let direction = self.dashing.signum() as f32;
            self.body.velocity.x = direction * Self::DASH_SPEED;
            if self.dashing.abs() == Self::DASH_BURST_END + 1 {
                self.body.velocity.x *= 0.1;
            }
            burst::dash_trail(ctx, center, direction);
        }
    }

    /// Jump, or wall-jump while sliding. Returns whether a jump happened.
    pub fn jump(&mut self) -> bool {
        if self.wall_slide {
            let body = &mut self.body;
            if body.flip && body.last_movement.x < 0.0 {
                body.velocity.x = Self::WALL_JUMP_PUSH;
            } else if !body.flip && body.last_movement.x > 0.0 {
                body.velocity.x = -Self::WALL_JUMP_PUSH;
            } else {
                return false;
            }
            body.velocity.y = Self::JUMP_VELOCITY;
            self.air_time = Self::AIRBORNE_TICKS + 1;
            self.jumps = self.jumps.saturating_sub(1);
            true
        } else if self.jumps > 0 {
            self.body.velocity.y = Self::JUMP_VELOCITY;
            self.jumps -= 1;
            self.air_time = Self::AIRBORNE_TICKS + 1;
            true
        } else {
            false
        }
    }

    /// Start a dash in the facing direction. Ignored while a dash or its
    /// cooldown is running.
    pub fn dash(&mut self, ctx: &mut impl WorldContext) -> bool {
        if self.dashing != 0 {
            return false;
        }
        ctx.play_sound(Sfx::Dash);
        self.dashing = if self.body.flip {
            -Self::DASH_TICKS
        } else {
            Self::DASH_TICKS
        };
        true
    }

    pub fn draw(&self, offset: Vec2, out: &mut RenderBuffer) {
        if !self.is_dash_burst() {
            self.body.draw(offset, out);
        }
    }
}
