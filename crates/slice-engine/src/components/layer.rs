/// Render layer. Controls draw order within a frame.
///
/// Layers are drawn back-to-front: Sky first, Particles last.
/// `Sky` and `Parallax` go to the backdrop surface; everything from
/// `Terrain` up is drawn on the main display, whose opaque pixels also cast
/// the drop silhouette (except `Particles`, which are drawn after it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Sky = 0,
    Parallax = 1,
    Terrain = 2,
    #[default]
    Actors = 3,
    Projectiles = 4,
    Particles = 5,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 6;

    /// Convert to u8 for the wire format.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_actors() {
        assert_eq!(RenderLayer::default(), RenderLayer::Actors);
    }

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Sky < RenderLayer::Parallax);
        assert!(RenderLayer::Parallax < RenderLayer::Terrain);
        assert!(RenderLayer::Terrain < RenderLayer::Actors);
        assert!(RenderLayer::Actors < RenderLayer::Projectiles);
        assert!(RenderLayer::Projectiles < RenderLayer::Particles);
    }

    #[test]
    fn wire_value_matches_draw_order() {
        assert_eq!(RenderLayer::Sky.as_u8(), 0);
        assert_eq!(RenderLayer::Particles.as_u8() as usize, RenderLayer::COUNT - 1);
    }
}
