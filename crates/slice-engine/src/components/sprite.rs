use glam::Vec2;

/// Identifies which texture atlas an image belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Handle to one image: an atlas cell plus the image's pixel size.
///
/// The size is needed by the simulation side for centering particles and
/// projectiles, placing the enemy gun and wrapping parallax clouds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Image {
    /// Which atlas this image belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Image {
    pub fn new(atlas: AtlasId, col: f32, row: f32, width: f32, height: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
