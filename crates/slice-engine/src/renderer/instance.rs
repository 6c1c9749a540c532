use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::components::sprite::Image;

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Positions are display pixels, already offset by the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Left edge on the display.
    pub x: f32,
    /// Top edge on the display.
    pub y: f32,
    /// Drawn width in pixels.
    pub width: f32,
    /// Drawn height in pixels.
    pub height: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub atlas_row: f32,
    /// Atlas index.
    pub atlas: f32,
    /// 1.0 when mirrored horizontally.
    pub flip: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(image: Image, screen_pos: Vec2, flip: bool) -> Self {
        Self {
            x: screen_pos.x,
            y: screen_pos.y,
            width: image.width,
            height: image.height,
            sprite_col: image.col,
            atlas_row: image.row,
            atlas: image.atlas.0 as f32,
            flip: if flip { 1.0 } else { 0.0 },
        }
    }
}

/// A contiguous run of instances on one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerBatch {
    pub layer: RenderLayer,
    /// Start index in the instance array
    pub start: u32,
    /// End index (exclusive) in the instance array
    pub end: u32,
}

/// Everything the host needs to composite one displayed frame.
///
/// Instance order is draw order. The host draws `[0, backdrop_end)` to the
/// backdrop surface, `[backdrop_end, silhouette_end)` plus the spark
/// polygons to the main display, stamps the main display's silhouette onto
/// the backdrop, then draws `[silhouette_end, ..)` on top.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub batches: Vec<LayerBatch>,
    /// First instance drawn on the main display.
    pub backdrop_end: u32,
    /// First instance drawn after the silhouette pass.
    pub silhouette_end: u32,
    /// Spark polygons as triangle-list vertices (x, y pairs, screen space).
    pub effects: Vec<f32>,
    /// Transition iris radius in display pixels, when a transition is active.
    pub iris_radius: Option<f32>,
    /// Offset applied when presenting the composed frame.
    pub shake: Vec2,
}

impl RenderBuffer {
    /// Alpha of the drop silhouette stamped onto the backdrop.
    pub const SILHOUETTE_ALPHA: u8 = 180;
    /// Offsets at which the silhouette is stamped.
    pub const SILHOUETTE_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            batches: Vec::with_capacity(RenderLayer::COUNT * 2),
            backdrop_end: 0,
            silhouette_end: 0,
            effects: Vec::new(),
            iris_radius: None,
            shake: Vec2::ZERO,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
        self.backdrop_end = 0;
        self.silhouette_end = 0;
        self.effects.clear();
        self.iris_radius = None;
        self.shake = Vec2::ZERO;
    }

    /// Append an instance, extending the last batch when the layer matches.
    pub fn push(&mut self, layer: RenderLayer, instance: RenderInstance) {
        let index = self.instances.len() as u32;
        self.instances.push(instance);
        match self.batches.last_mut() {
            Some(batch) if batch.layer == layer && batch.end == index => batch.end += 1,
            _ => self.batches.push(LayerBatch {
                layer,
                start: index,
                end: index + 1,
            }),
        }
    }

    /// Append a convex quad as two triangles.
    pub fn push_polygon(&mut self, points: [Vec2; 4]) {
        for i in [0, 1, 2, 0, 2, 3] {
            self.effects.push(points[i].x);
            self.effects.push(points[i].y);
        }
    }

    pub fn mark_backdrop_end(&mut self) {
        self.backdrop_end = self.instance_count();
    }

    pub fn mark_silhouette_end(&mut self) {
        self.silhouette_end = self.instance_count();
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Number of floats in the effects vertex stream.
    pub fn effects_len(&self) -> u32 {
        self.effects.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.effects.as_ptr()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
