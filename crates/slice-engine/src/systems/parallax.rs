//! Background clouds drifting at depth-scaled parallax.

use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::components::sprite::Image;
use crate::core::rng::Rng;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec2,
    pub image: Image,
    pub speed: f32,
    /// Fraction of the camera scroll applied to this cloud, in [0.2, 0.8).
    pub depth: f32,
}

impl Cloud {
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Screen position, wrapped so the cloud re-enters from the opposite edge.
    pub fn screen_pos(&self, offset: Vec2, view_size: Vec2) -> Vec2 {
        let render = self.pos - offset * self.depth;
        let size = self.image.size();
        Vec2::new(
            render.x.rem_euclid(view_size.x + size.x) - size.x,
            render.y.rem_euclid(view_size.y + size.y) - size.y,
        )
    }
}

/// A layer of clouds, kept sorted far to near.
#[derive(Debug, Clone, Default)]
pub struct Clouds {
    clouds: Vec<Cloud>,
}

impl Clouds {
    pub const DEFAULT_COUNT: usize = 16;
    const SPREAD: f32 = 99999.0;

    /// Scatter `count` clouds using variants from `images`. No images, no clouds.
    pub fn new(images: &[Image], count: usize, rng: &mut Rng) -> Self {
        if images.is_empty() {
            return Self::default();
        }
        let mut clouds: Vec<Cloud> = (0..count)
            .map(|_| {
                let pos = Vec2::new(rng.next_f32() * Self::SPREAD, rng.next_f32() * Self::SPREAD);
                let image = images[rng.next_int(images.len() as u32) as usize];
                Cloud {
                    pos,
                    image,
                    speed: rng.next_f32() * 0.05 + 0.05,
                    depth: rng.next_f32() * 0.6 + 0.2,
                }
            })
            .collect();
        clouds.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self { clouds }
    }

    pub fn update(&mut self) {
        for cloud in &mut self.clouds {
            cloud.update();
        }
    }

    pub fn draw(&self, offset: Vec2, view_size: Vec2, out: &mut RenderBuffer) {
        for cloud in &self.clouds {
            out.push(
                RenderLayer::Parallax,
                RenderInstance::new(cloud.image, cloud.screen_pos(offset, view_size), false),
            );
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cloud> {
        self.clouds.iter()
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::AtlasId;

    fn cloud_image() -> Image {
        Image::new(AtlasId(0), 0.0, 5.0, 40.0, 20.0)
    }

    #[test]
    fn clouds_are_sorted_by_depth() {
        let mut rng = Rng::new(11);
        let clouds = Clouds::new(&[cloud_image()], Clouds::DEFAULT_COUNT, &mut rng);
        assert_eq!(clouds.len(), 16);
        let depths: Vec<f32> = clouds.iter().map(|c| c.depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
        for cloud in clouds.iter() {
            assert!((0.2..0.8).contains(&cloud.depth));
            assert!((0.05..0.1).contains(&cloud.speed));
        }
    }

    #[test]
    fn no_images_means_no_clouds() {
        let clouds = Clouds::new(&[], 16, &mut Rng::new(1));
        assert!(clouds.is_empty());
    }

    #[test]
    fn screen_position_wraps_inside_view() {
        let cloud = Cloud {
            pos: Vec2::new(1000.0, 500.0),
            image: cloud_image(),
            speed: 0.05,
            depth: 0.5,
        };
        let view = Vec2::new(320.0, 240.0);
        let p = cloud.screen_pos(Vec2::new(200.0, 0.0), view);
        // 1000 - 100 = 900; 900 mod 360 = 180.
        assert_eq!(p.x, 140.0);
        // 500 mod 260 = 240.
        assert_eq!(p.y, 220.0);
        assert!(p.x >= -40.0 && p.x < 320.0);
    }

    #[test]
    fn update_drifts_right() {
        let mut clouds = Clouds::new(&[cloud_image()], 2, &mut Rng::new(5));
        let before: Vec<f32> = clouds.iter().map(|c| c.pos.x).collect();
        clouds.update();
        for (cloud, x) in clouds.iter().zip(before) {
            assert!(cloud.pos.x > x);
        }
    }
}
