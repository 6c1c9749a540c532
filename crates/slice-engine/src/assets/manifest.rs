use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing atlases, images, clips and sounds for a game.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    pub atlases: Vec<AtlasDescriptor>,
    /// Named image lookup: key → atlas cell + pixel size.
    #[serde(default)]
    pub images: HashMap<String, ImageDescriptor>,
    /// Named clip lookup, keyed `"{entity_type}/{action}"`.
    #[serde(default)]
    pub clips: HashMap<String, ClipDescriptor>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "tiles").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file (e.g., "tiles.png").
    pub path: String,
}

/// Describes a named image within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Describes an animation clip as an ordered list of image keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipDescriptor {
    pub frames: Vec<String>,
    /// Ticks each image is held (default: 5).
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_duration() -> u32 {
    5
}

fn default_looping() -> bool {
    true
}

fn default_volume() -> f32 {
    1.0
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "atlases": [],
            "sounds": {
                "shoot": { "path": "sfx/shoot.wav", "event_id": 4, "volume": 0.4 },
                "music": { "path": "music.wav" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);

        let shoot = &manifest.sounds["shoot"];
        assert_eq!(shoot.event_id, Some(4));
        assert_eq!(shoot.volume, 0.4);

        let music = &manifest.sounds["music"];
        assert_eq!(music.event_id, None);
        assert_eq!(music.volume, 1.0);
    }

    #[test]
    fn clip_defaults() {
        let json = r#"{
            "atlases": [
                { "name": "sprites", "cols": 16, "rows": 8, "path": "sprites.png" }
            ],
            "images": {
                "player/idle/0": { "atlas": 0, "col": 0, "row": 0, "width": 14, "height": 18 }
            },
            "clips": {
                "player/idle": { "frames": ["player/idle/0"] },
                "particle/leaf": { "frames": ["player/idle/0"], "duration": 20, "looping": false }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let idle = &manifest.clips["player/idle"];
        assert_eq!(idle.duration, 5);
        assert!(idle.looping);
        let leaf = &manifest.clips["particle/leaf"];
        assert_eq!(leaf.duration, 20);
        assert!(!leaf.looping);
        assert_eq!(manifest.images["player/idle/0"].height, 18);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AssetManifest::from_json("{ \"atlases\": 3 }").is_err());
    }
}
