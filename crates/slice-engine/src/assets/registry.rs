use std::collections::HashMap;

use crate::assets::error::AssetError;
use crate::assets::manifest::AssetManifest;
use crate::components::animation::Clip;
use crate::components::sprite::{AtlasId, Image};

/// Lookup surface the world needs from an asset source.
pub trait AssetProvider {
    /// Image handle by key.
    fn image(&self, key: &str) -> Result<Image, AssetError>;

    /// Clip template by `"{entity_type}/{action}"` key. Callers take
    /// `fresh()` copies; the template itself is never advanced.
    fn clip_template(&self, key: &str) -> Result<&Clip, AssetError>;

    /// Every image whose key starts with `prefix`, ordered by key.
    fn image_group(&self, prefix: &str) -> Vec<Image>;
}

/// Registry of named images and clip templates, built from an AssetManifest.
pub struct AssetRegistry {
    images: HashMap<String, Image>,
    clips: HashMap<String, Clip>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            clips: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    ///
    /// Every clip is validated here: unknown frame keys, empty frame lists
    /// and zero durations are reported instead of deferred to playback.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut images = HashMap::with_capacity(manifest.images.len());
        for (key, desc) in &manifest.images {
            images.insert(
                key.clone(),
                Image::new(
                    AtlasId(desc.atlas),
                    desc.col as f32,
                    desc.row as f32,
                    desc.width as f32,
                    desc.height as f32,
                ),
            );
        }

        let mut clips = HashMap::with_capacity(manifest.clips.len());
        for (key, desc) in &manifest.clips {
            let frames = desc
                .frames
                .iter()
                .map(|frame| {
                    images
                        .get(frame)
                        .copied()
                        .ok_or_else(|| AssetError::MissingImage(frame.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            clips.insert(key.clone(), Clip::new(key, frames, desc.duration, desc.looping)?);
        }

        log::debug!(
            "asset registry: {} images, {} clips",
            images.len(),
            clips.len()
        );
        Ok(Self { images, clips })
    }

    /// Parse and register a JSON manifest in one step.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Self::from_manifest(&AssetManifest::from_json(json)?)
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProvider for AssetRegistry {
    fn image(&self, key: &str) -> Result<Image, AssetError> {
        self.images
            .get(key)
            .copied()
            .ok_or_else(|| AssetError::MissingImage(key.to_string()))
    }

    fn clip_template(&self, key: &str) -> Result<&Clip, AssetError> {
        self.clips
            .get(key)
            .ok_or_else(|| AssetError::MissingClip(key.to_string()))
    }

    fn image_group(&self, prefix: &str) -> Vec<Image> {
        let mut keyed: Vec<(&String, &Image)> = self
            .images
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(b.0));
        keyed.into_iter().map(|(_, image)| *image).collect()
    }
}
