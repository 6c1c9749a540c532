//! Shared physics body for the player and enemies.
//!
//! `integrate` is the only place positions change in response to the tile
//! grid. Collision is resolved one axis at a time against the solid tiles
//! around the body: X is moved and pushed out fully before Y is tried.

use glam::Vec2;

use crate::assets::catalog::ClipSet;
use crate::components::animation::Clip;
use crate::components::layer::RenderLayer;
use crate::components::tilemap::TileQuery;
use crate::core::rect::Rect;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

pub const GRAVITY: f32 = 0.2;
pub const TERMINAL_VELOCITY: f32 = 5.0;
/// Collision box of both actor types.
pub const ACTOR_SIZE: Vec2 = Vec2::new(8.0, 15.0);
/// Sprite position relative to the collision box.
pub const ANIM_OFFSET: Vec2 = Vec2::new(-3.0, -3.0);

/// Sides that touched a solid tile during the last `integrate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collisions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Collisions {
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }
}

/// Named animation an actor can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Run,
    Jump,
    WallSlide,
}

impl Action {
    pub const COUNT: usize = 4;
    pub const ALL: [Action; Self::COUNT] = [
        Action::Idle,
        Action::Run,
        Action::Jump,
        Action::WallSlide,
    ];

    /// Clip key suffix.
    pub fn name(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Run => "run",
            Action::Jump => "jump",
            Action::WallSlide => "wall_slide",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    /// Top-left of the collision box.
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub collisions: Collisions,
    /// True when facing left.
    pub flip: bool,
    pub last_movement: Vec2,
    pub anim_offset: Vec2,
    action: Action,
    clip: Clip,
    clips: ClipSet,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, clips: &ClipSet) -> Self {
        Self {
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::default(),
            flip: false,
            last_movement: Vec2::ZERO,
            anim_offset: ANIM_OFFSET,
            action: Action::Idle,
            clip: clips.get(Action::Idle).fresh(),
            clips: clips.clone(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    /// Switch animation. Re-selecting the current action keeps its timing.
    pub fn set_action(&mut self, action: Action) {
        if action != self.action {
            self.action = action;
            self.clip = self.clips.get(action).fresh();
        }
    }

    /// Advance one tick against the tile grid. `movement` is this tick's
    /// intended displacement before velocity is added.
    pub fn integrate(&mut self, tiles: &impl TileQuery, movement: Vec2) {
        self.collisions = Collisions::default();
        let delta = movement + self.velocity;

        self.pos.x += delta.x;
        let mut rect = self.rect();
        for tile in tiles.rects_near(self.pos) {
            if rect.overlaps(&tile) {
                if delta.x > 0.0 {
                    rect.set_right(tile.left());
                    self.collisions.right = true;
                }
                if delta.x < 0.0 {
                    rect.set_left(tile.right());
                    self.collisions.left = true;
                }
                self.pos.x = rect.x;
            }
        }

        self.pos.y += delta.y;
        let mut rect = self.rect();
        for tile in tiles.rects_near(self.pos) {
            if rect.overlaps(&tile) {
                if delta.y > 0.0 {
                    rect.set_bottom(tile.top());
                    self.collisions.down = true;
                }
                if delta.y < 0.0 {
                    rect.set_top(tile.bottom());
                    self.collisions.up = true;
                }
                self.pos.y = rect.y;
            }
        }

        if movement.x > 0.0 {
            self.flip = false;
        }
        if movement.x < 0.0 {
            self.flip = true;
        }

        self.apply_gravity();
        self.clip.update();
        self.last_movement = movement;
    }

    /// Accelerate downward up to terminal velocity. Touching a floor or
    /// ceiling this tick cancels vertical speed.
    pub fn apply_gravity(&mut self) {
        self.velocity.y = (self.velocity.y + GRAVITY).min(TERMINAL_VELOCITY);
        if self.collisions.down || self.collisions.up {
            self.velocity.y = 0.0;
        }
    }

    pub fn draw(&self, offset: Vec2, out: &mut RenderBuffer) {
        out.push(
            RenderLayer::Actors,
            RenderInstance::new(
                self.clip.current_image(),
                self.pos - offset + self.anim_offset,
                self.flip,
            ),
        );
    }
}
