//! Meadow's two levels, drawn as text.
//!
//! Legend: `G` grass, `S` stone, `T` tree (decor, sheds leaves), `P` player
//! start, `E` armed enemy, `e` unarmed enemy. Anything else is empty.

use glam::Vec2;
use slice_engine::{AssetError, AssetProvider, Level, Tile, Tilemap, WeaponKind};

pub const TILE_SIZE: f32 = 16.0;

const MEADOW: &[&str] = &[
    "........................................",
    "........................................",
    "........................................",
    "........................................",
    "..........................E.............",
    ".........................GGGG...........",
    "........................................",
    "...T.............e......................",
    "...............GGGGG.............T......",
    "........................................",
    ".P.......................E..............",
    "GGGGGGGGGGG.....GGGGGGGGGGGGGG...GGGGGGG",
    "SSSSSSSSSSS.....SSSSSSSSSSSSSS...SSSSSSS",
    "SSSSSSSSSSSGGGGGSSSSSSSSSSSSSSGGGSSSSSSS",
    "SSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSS",
];

const CLIFFS: &[&str] = &[
    "S......................................S",
    "S......................................S",
    "S...............E......................S",
    "S.............GGGGGG...................S",
    "S......................................S",
    "S.........................E.......T....S",
    "S.......................GGGGGGGGGGGGG..S",
    "S......................................S",
    "S....T..........e......................S",
    "S...GGGGGG....GGGGG....................S",
    "S.P....................................S",
    "SGGGG......GGGGG.........GGGGGGGG...E..S",
    "SSSSS......SSSSS.........SSSSSSSSGGGGGGS",
    "SSSSSGGGGGGSSSSSGGGGGGGGGSSSSSSSSSSSSSSS",
    "SSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSSS",
];

/// Tile images used by the parser.
struct Palette {
    grass_top: Tile,
    grass: Tile,
    stone: Tile,
    tree: slice_engine::Image,
}

impl Palette {
    fn load(assets: &impl AssetProvider) -> Result<Self, AssetError> {
        Ok(Self {
            grass_top: Tile::solid(assets.image("tiles/grass/1")?),
            grass: Tile::solid(assets.image("tiles/grass/4")?),
            stone: Tile::solid(assets.image("tiles/stone/4")?),
            tree: assets.image("tiles/large_decor/tree")?,
        })
    }
}

pub fn build(assets: &impl AssetProvider) -> Result<Vec<Level>, AssetError> {
    let palette = Palette::load(assets)?;
    Ok([MEADOW, CLIFFS]
        .iter()
        .map(|rows| parse(rows, &palette))
        .collect())
}

fn parse(rows: &[&str], palette: &Palette) -> Level {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
    let mut level = Level::new(Tilemap::new(width, rows.len() as u32, TILE_SIZE));
    let mut trees = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.bytes().enumerate() {
            let (tx, ty) = (x as i32, y as i32);
            let origin = Vec2::new(tx as f32, ty as f32) * TILE_SIZE;
            match cell {
                b'G' => {
                    let covered = y > 0 && rows[y - 1].as_bytes().get(x) == Some(&b'G');
                    let tile = if covered { palette.grass } else { palette.grass_top };
                    level.tilemap.set(tx, ty, Some(tile));
                }
                b'S' => level.tilemap.set(tx, ty, Some(palette.stone)),
                b'T' => trees.push(origin),
                // Actors stand on the tile below their cell.
                b'P' => level = level.with_player(origin + Vec2::new(4.0, 1.0)),
                b'E' => level = level.with_enemy(origin + Vec2::new(4.0, 1.0), WeaponKind::Basic),
                b'e' => level = level.with_enemy(origin + Vec2::new(4.0, 1.0), WeaponKind::None),
                _ => {}
            }
        }
    }

    // Trees are 2x2 tiles anchored on their cell's bottom edge.
    for origin in trees {
        level = level.with_tree(origin - Vec2::new(0.0, TILE_SIZE), palette.tree);
    }
    level
}
