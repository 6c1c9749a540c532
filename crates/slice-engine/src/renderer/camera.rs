use glam::Vec2;

/// Side-scrolling camera.
///
/// `scroll` is the world position of the view's top-left corner. Following
/// moves it a fixed fraction of the remaining distance each tick; drawing
/// uses the truncated value so sprites land on whole pixels.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// World position of the view's top-left corner.
    pub scroll: Vec2,
}

impl Camera2D {
    /// Divisor applied to the remaining distance each follow step.
    pub const SMOOTHING: f32 = 30.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll: Vec2::ZERO,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Move one step toward centering `target`.
    pub fn follow(&mut self, target: Vec2) {
        self.scroll += (target - self.size() / 2.0 - self.scroll) / Self::SMOOTHING;
    }

    /// Scroll truncated toward zero, used for every draw offset.
    pub fn render_offset(&self) -> Vec2 {
        self.scroll.trunc()
    }
}
