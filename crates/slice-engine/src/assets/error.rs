use thiserror::Error;

/// Failures while resolving game assets.
///
/// All of these are asset-pipeline mistakes. They surface once when a
/// world is built; nothing in the per-frame simulation returns them.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no image registered under `{0}`")]
    MissingImage(String),
    #[error("no clip registered under `{0}`")]
    MissingClip(String),
    #[error("clip `{0}` has no images")]
    EmptyClip(String),
    #[error("clip `{0}` has a frame duration of zero")]
    ZeroFrameDuration(String),
    #[error("a world needs at least one level")]
    NoLevels,
    #[error(transparent)]
    Manifest(#[from] serde_json::Error),
}
