pub mod catalog;
pub mod error;
pub mod manifest;
pub mod registry;

pub use catalog::{Catalog, ClipSet, ParticleClips};
pub use error::AssetError;
pub use manifest::AssetManifest;
pub use registry::{AssetProvider, AssetRegistry};
