//! Tile grid used for both collision and terrain rendering.
//!
//! Tiles are stored in a dense row-major grid anchored at the world origin. Solid
//! tiles block bodies, projectiles and the enemy ground probe; non-solid
//! tiles (and off-grid decor) are only drawn.

use glam::Vec2;

use crate::components::layer::RenderLayer;
use crate::components::sprite::Image;
use crate::core::rect::Rect;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// The 3x3 block of cells around a position that can hold collision
/// candidates for a body no larger than one tile.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Collision queries the simulation needs from the world.
pub trait TileQuery {
    /// Whether `point` lies inside a solid tile.
    fn solid_at(&self, point: Vec2) -> bool;

    /// Solid tile rectangles in the neighbourhood of `pos`.
    fn rects_near(&self, pos: Vec2) -> Vec<Rect>;
}

/// A single grid tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub image: Image,
    /// Whether the tile takes part in collision.
    pub solid: bool,
}

impl Tile {
    /// A tile that blocks movement.
    pub fn solid(image: Image) -> Self {
        Self { image, solid: true }
    }

    /// A purely decorative grid tile.
    pub fn decor(image: Image) -> Self {
        Self {
            image,
            solid: false,
        }
    }
}

/// Grid of tiles plus free-standing decor.
///
/// Tiles are stored in row-major order: index = y * width + x
#[derive(Debug, Clone)]
pub struct Tilemap {
    /// Width of the grid in tiles.
    pub width: u32,
    /// Height of the grid in tiles.
    pub height: u32,
    /// Size of each tile in pixels.
    pub tile_size: f32,
    tiles: Vec<Option<Tile>>,
    decor: Vec<(Vec2, Image)>,
}

impl Tilemap {
    /// Create a new empty tilemap.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            tile_size,
            tiles: vec![None; count],
            decor: Vec::new(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    /// Get the tile at grid cell (x, y). Cells outside the grid are empty.
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).and_then(|i| self.tiles[i].as_ref())
    }

    /// Set the tile at grid cell (x, y). Out-of-range cells are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: Option<Tile>) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Fill a rectangular block of cells with a tile.
    #[cfg(test)]
    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, tile: Option<Tile>) {
        for ty in y..y + h as i32 {
            for tx in x..x + w as i32 {
                self.set(tx, ty, tile);
            }
        }
    }

    /// Place a decorative image at a free world position (top-left).
    pub fn add_decor(&mut self, pos: Vec2, image: Image) {
        self.decor.push((pos, image));
    }

    pub fn decor(&self) -> &[(Vec2, Image)] {
        &self.decor
    }

    /// Grid cell containing a world position. May lie outside the grid.
    pub fn world_to_tile(&self, world_pos: Vec2) -> (i32, i32) {
        let local = world_pos / self.tile_size;
        (local.x.floor() as i32, local.y.floor() as i32)
    }

    /// World position of a cell's top-left corner.
    pub fn tile_origin(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.tile_size
    }

    pub fn tile_rect(&self, x: i32, y: i32) -> Rect {
        Rect::from_pos_size(self.tile_origin(x, y), Vec2::splat(self.tile_size))
    }

    /// Push decor, then every grid tile overlapping the view, offset by the
    /// camera. `offset` is the view's top-left in world space.
    pub fn draw(&self, offset: Vec2, view_size: Vec2, out: &mut RenderBuffer) {
        for (pos, image) in &self.decor {
            out.push(
                RenderLayer::Terrain,
                RenderInstance::new(*image, *pos - offset, false),
            );
        }

        let (min_tx, min_ty) = self.world_to_tile(offset);
        let (max_tx, max_ty) = self.world_to_tile(offset + view_size);

        for ty in min_ty.max(0)..=max_ty.min(self.height as i32 - 1) {
            for tx in min_tx.max(0)..=max_tx.min(self.width as i32 - 1) {
                if let Some(tile) = self.get(tx, ty) {
                    out.push(
                        RenderLayer::Terrain,
                        RenderInstance::new(tile.image, self.tile_origin(tx, ty) - offset, false),
                    );
                }
            }
        }
    }
}

impl TileQuery for Tilemap {
    fn solid_at(&self, point: Vec2) -> bool {
        let (x, y) = self.world_to_tile(point);
        self.get(x, y).is_some_and(|t| t.solid)
    }

    fn rects_near(&self, pos: Vec2) -> Vec<Rect> {
        let (cx, cy) = self.world_to_tile(pos);
        NEIGHBOR_OFFSETS
            .iter()
            .map(|(dx, dy)| (cx + dx, cy + dy))
            .filter(|&(x, y)| self.get(x, y).is_some_and(|t| t.solid))
            .map(|(x, y)| self.tile_rect(x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::AtlasId;

    fn block() -> Image {
        Image::new(AtlasId(0), 0.0, 0.0, 16.0, 16.0)
    }

    #[test]
    fn new_tilemap_is_empty() {
        let tm = Tilemap::new(10, 10, 16.0);
        assert!(tm.get(3, 3).is_none());
        assert!(!tm.solid_at(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn out_of_bounds_and_negative_cells_are_empty() {
        let mut tm = Tilemap::new(5, 5, 16.0);
        tm.set(-1, 2, Some(Tile::solid(block())));
        tm.set(7, 7, Some(Tile::solid(block())));
        assert!(tm.get(-1, 2).is_none());
        assert!(tm.get(7, 7).is_none());
        assert!(!tm.solid_at(Vec2::new(-4.0, 40.0)));
    }

    #[test]
    fn solid_at_ignores_decor_tiles() {
        let mut tm = Tilemap::new(5, 5, 16.0);
        tm.set(1, 1, Some(Tile::solid(block())));
        tm.set(2, 1, Some(Tile::decor(block())));
        assert!(tm.solid_at(Vec2::new(20.0, 20.0)));
        assert!(!tm.solid_at(Vec2::new(40.0, 20.0)));
        assert!(!tm.solid_at(Vec2::new(20.0, 40.0)));
    }

    #[test]
    fn rects_near_only_returns_solid_neighbours() {
        let mut tm = Tilemap::new(10, 10, 16.0);
        tm.fill_rect(0, 5, 10, 1, Some(Tile::solid(block())));
        tm.set(4, 4, Some(Tile::decor(block())));
        // Cell (4, 4): the row below holds three solid neighbours.
        let rects = tm.rects_near(Vec2::new(70.0, 70.0));
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.y == 80.0 && r.w == 16.0));
        // Far from the floor nothing is returned.
        assert!(tm.rects_near(Vec2::new(70.0, 10.0)).is_empty());
    }

    #[test]
    fn world_to_tile_floors_negative_positions() {
        let tm = Tilemap::new(4, 4, 16.0);
        assert_eq!(tm.world_to_tile(Vec2::new(-1.0, 5.0)), (-1, 0));
        assert_eq!(tm.world_to_tile(Vec2::new(16.0, 17.0)), (1, 1));
        assert_eq!(tm.tile_origin(1, 1), Vec2::new(16.0, 16.0));
    }

    #[test]
    fn draw_culls_to_view() {
        let mut tm = Tilemap::new(100, 100, 16.0);
        tm.fill_rect(0, 0, 100, 100, Some(Tile::solid(block())));
        let mut out = RenderBuffer::new();
        tm.draw(Vec2::new(160.0, 160.0), Vec2::new(64.0, 64.0), &mut out);
        // 64 px spans 4 tiles; the inclusive far edge adds one more per axis.
        assert_eq!(out.instance_count(), 25);
        assert_eq!(out.instances[0].x, 0.0);
        assert_eq!(out.instances[0].y, 0.0);
    }

    #[test]
    fn decor_is_drawn_before_grid() {
        let mut tm = Tilemap::new(4, 4, 16.0);
        tm.set(0, 0, Some(Tile::solid(block())));
        let tree = Image::new(AtlasId(0), 5.0, 0.0, 32.0, 32.0);
        tm.add_decor(Vec2::new(8.0, 8.0), tree);
        let mut out = RenderBuffer::new();
        tm.draw(Vec2::ZERO, Vec2::new(64.0, 64.0), &mut out);
        assert_eq!(out.instance_count(), 2);
        assert_eq!(out.instances[0].sprite_col, 5.0);
    }
}
