//! Radial sparks: fly along a fixed angle, slow down, vanish.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::renderer::instance::RenderBuffer;

#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    /// Heading in radians.
    pub angle: f32,
    pub speed: f32,
}

impl Spark {
    /// Speed lost per tick.
    pub const DECAY: f32 = 0.1;

    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self { pos, angle, speed }
    }

    fn heading(&self, offset: f32) -> Vec2 {
        Vec2::from_angle(self.angle + offset)
    }

    /// Advance one tick. Returns false once speed has reached 0.
    pub fn update(&mut self) -> bool {
        self.pos += self.heading(0.0) * self.speed;
        self.speed = (self.speed - Self::DECAY).max(0.0);
        self.speed > 0.0
    }

    /// Kite outline: long along the heading, narrow across it.
    pub fn polygon(&self, offset: Vec2) -> [Vec2; 4] {
        let c = self.pos - offset;
        [
            c + self.heading(0.0) * self.speed * 3.0,
            c + self.heading(FRAC_PI_2) * self.speed * 0.5,
            c + self.heading(PI) * self.speed * 3.0,
            c + self.heading(-FRAC_PI_2) * self.speed * 0.5,
        ]
    }

    pub fn draw(&self, offset: Vec2, out: &mut RenderBuffer) {
        out.push_polygon(self.polygon(offset));
    }
}
