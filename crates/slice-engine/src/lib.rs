pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod world;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::context::{FrameContext, Status, WorldContext};
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use api::types::{GameEvent, Sfx, SoundEvent};
pub use assets::{AssetError, AssetManifest, AssetProvider, AssetRegistry, Catalog};
pub use bridge::protocol::{ProtocolLayout, HEADER_FLOATS};
pub use components::animation::Clip;
pub use components::layer::RenderLayer;
pub use components::sprite::{AtlasId, Image};
pub use components::tilemap::{Tile, TileQuery, Tilemap};
pub use core::rect::Rect;
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use entities::{Action, Body, Enemy, Player, WeaponKind};
pub use input::{Command, Controls, InputEvent, InputQueue, MovementAxis};
pub use renderer::{Camera2D, LayerBatch, RenderBuffer, RenderInstance};
pub use systems::effects::{EffectsState, Particle, ParticleKind, Projectile, Spark};
pub use systems::parallax::Clouds;
pub use world::{Level, Spawner, World};
