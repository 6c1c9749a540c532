//! Level descriptions: terrain plus where things start.

use glam::Vec2;

use crate::components::sprite::Image;
use crate::components::tilemap::Tilemap;
use crate::core::rect::Rect;
use crate::entities::enemy::WeaponKind;

/// Leaf-dropping canopy relative to a tree's top-left, as (x, y, w, h).
pub const CANOPY: Rect = Rect::new(4.0, 4.0, 23.0, 13.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawner {
    Player(Vec2),
    Enemy { pos: Vec2, weapon: WeaponKind },
}

/// Everything needed to (re)build a level from scratch.
#[derive(Debug, Clone)]
pub struct Level {
    pub tilemap: Tilemap,
    pub spawners: Vec<Spawner>,
    /// Leaf spawner areas in world space.
    pub trees: Vec<Rect>,
}

impl Level {
    pub fn new(tilemap: Tilemap) -> Self {
        Self {
            tilemap,
            spawners: Vec::new(),
            trees: Vec::new(),
        }
    }

    pub fn with_player(mut self, pos: Vec2) -> Self {
        self.spawners.push(Spawner::Player(pos));
        self
    }

    pub fn with_enemy(mut self, pos: Vec2, weapon: WeaponKind) -> Self {
        self.spawners.push(Spawner::Enemy { pos, weapon });
        self
    }

    /// Place a tree: drawn as terrain decor, with a canopy that sheds leaves.
    pub fn with_tree(mut self, pos: Vec2, image: Image) -> Self {
        self.tilemap.add_decor(pos, image);
        self.trees.push(Rect::new(
            pos.x + CANOPY.x,
            pos.y + CANOPY.y,
            CANOPY.w,
            CANOPY.h,
        ));
        self
    }

    /// Player start. When several spawners exist the last one wins.
    pub fn player_spawn(&self) -> Option<Vec2> {
        self.spawners.iter().rev().find_map(|s| match s {
            Spawner::Player(pos) => Some(*pos),
            Spawner::Enemy { .. } => None,
        })
    }

    pub fn enemy_spawns(&self) -> impl Iterator<Item = (Vec2, WeaponKind)> + '_ {
        self.spawners.iter().filter_map(|s| match s {
            Spawner::Enemy { pos, weapon } => Some((*pos, *weapon)),
            Spawner::Player(_) => None,
        })
    }
}
