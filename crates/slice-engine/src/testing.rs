//! Test fixtures: a small asset manifest, tile maps and a recording
//! `WorldContext`.

use crate::api::context::WorldContext;
use crate::api::types::Sfx;
use crate::assets::catalog::Catalog;
use crate::assets::registry::AssetRegistry;
use crate::components::sprite::{AtlasId, Image};
use crate::components::tilemap::{Tile, Tilemap};
use crate::core::rng::Rng;
use crate::systems::effects::{Particle, Projectile, Spark};

/// No `enemy/jump`, `particle/blood` or `particle/coin`, so the fallbacks
/// are exercised too.
pub const MANIFEST: &str = r#"{
    "atlases": [
        { "name": "sprites", "cols": 16, "rows": 16, "path": "sprites.png" }
    ],
    "images": {
        "player/idle/0": { "atlas": 0, "col": 0, "row": 0, "width": 14, "height": 18 },
        "player/idle/1": { "atlas": 0, "col": 1, "row": 0, "width": 14, "height": 18 },
        "player/run/0": { "atlas": 0, "col": 2, "row": 0, "width": 14, "height": 18 },
        "player/run/1": { "atlas": 0, "col": 3, "row": 0, "width": 14, "height": 18 },
        "player/jump/0": { "atlas": 0, "col": 4, "row": 0, "width": 14, "height": 18 },
        "player/wall_slide/0": { "atlas": 0, "col": 5, "row": 0, "width": 14, "height": 18 },
        "enemy/idle/0": { "atlas": 0, "col": 0, "row": 1, "width": 14, "height": 18 },
        "enemy/run/0": { "atlas": 0, "col": 1, "row": 1, "width": 14, "height": 18 },
        "enemy/run/1": { "atlas": 0, "col": 2, "row": 1, "width": 14, "height": 18 },
        "particles/particle/0": { "atlas": 0, "col": 0, "row": 2, "width": 4, "height": 4 },
        "particles/particle/1": { "atlas": 0, "col": 1, "row": 2, "width": 4, "height": 4 },
        "particles/leaf/0": { "atlas": 0, "col": 2, "row": 2, "width": 4, "height": 4 },
        "particles/leaf/1": { "atlas": 0, "col": 3, "row": 2, "width": 4, "height": 4 },
        "particles/leaf/2": { "atlas": 0, "col": 4, "row": 2, "width": 4, "height": 4 },
        "background": { "atlas": 0, "col": 0, "row": 3, "width": 320, "height": 240 },
        "gun": { "atlas": 0, "col": 0, "row": 4, "width": 7, "height": 4 },
        "projectile": { "atlas": 0, "col": 1, "row": 4, "width": 6, "height": 2 },
        "clouds/0": { "atlas": 0, "col": 0, "row": 5, "width": 40, "height": 20 },
        "clouds/1": { "atlas": 0, "col": 1, "row": 5, "width": 40, "height": 20 },
        "tiles/grass/0": { "atlas": 0, "col": 0, "row": 6, "width": 16, "height": 16 }
    },
    "clips": {
        "player/idle": { "frames": ["player/idle/0", "player/idle/1"], "duration": 6 },
        "player/run": { "frames": ["player/run/0", "player/run/1"], "duration": 4 },
        "player/jump": { "frames": ["player/jump/0"] },
        "player/wall_slide": { "frames": ["player/wall_slide/0"] },
        "enemy/idle": { "frames": ["enemy/idle/0"], "duration": 6 },
        "enemy/run": { "frames": ["enemy/run/0", "enemy/run/1"], "duration": 4 },
        "particle/particle": {
            "frames": ["particles/particle/0", "particles/particle/1"],
            "duration": 3,
            "looping": false
        },
        "particle/leaf": {
            "frames": ["particles/leaf/0", "particles/leaf/1", "particles/leaf/2"],
            "duration": 20,
            "looping": false
        }
    }
}"#;

pub fn registry() -> AssetRegistry {
    AssetRegistry::from_json(MANIFEST).expect("test manifest should load")
}

pub fn catalog() -> Catalog {
    Catalog::load(&registry()).expect("test catalog should resolve")
}

/// A 16x16 tile image.
pub fn block() -> Image {
    Image::new(AtlasId(0), 0.0, 6.0, 16.0, 16.0)
}

/// A map whose row `floor_row` is solid from edge to edge.
pub fn floor_map(width: u32, height: u32, floor_row: i32) -> Tilemap {
    let mut map = Tilemap::new(width, height, 16.0);
    map.fill_rect(0, floor_row, width, 1, Some(Tile::solid(block())));
    map
}

/// `WorldContext` that records everything entities do.
pub struct RecordingContext {
    pub catalog: Catalog,
    pub rng: Rng,
    pub particles: Vec<Particle>,
    pub sparks: Vec<Spark>,
    pub projectiles: Vec<Projectile>,
    pub sounds: Vec<Sfx>,
    pub screenshake: f32,
    pub dead: u32,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::with_seed(7)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            catalog: catalog(),
            rng: Rng::new(seed),
            particles: Vec::new(),
            sparks: Vec::new(),
            projectiles: Vec::new(),
            sounds: Vec::new(),
            screenshake: 0.0,
            dead: 0,
        }
    }

    pub fn count_sound(&self, sfx: Sfx) -> usize {
        self.sounds.iter().filter(|s| **s == sfx).count()
    }
}

impl WorldContext for RecordingContext {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    fn spawn_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    fn spawn_spark(&mut self, spark: Spark) {
        self.sparks.push(spark);
    }

    fn spawn_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    fn play_sound(&mut self, sfx: Sfx) {
        self.sounds.push(sfx);
    }

    fn raise_screenshake(&mut self, amount: f32) {
        self.screenshake = self.screenshake.max(amount);
    }

    fn death_counter(&self) -> u32 {
        self.dead
    }

    fn register_death(&mut self) {
        self.dead += 1;
    }
}

/// Step `f` until it returns true or `limit` ticks pass. Returns the tick
/// count on success.
pub fn run_until(limit: usize, mut f: impl FnMut() -> bool) -> Option<usize> {
    (1..=limit).find(|_| f())
}
