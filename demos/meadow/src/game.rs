use slice_engine::{
    AssetError, AssetRegistry, Catalog, EngineContext, Game, GameConfig, InputQueue, RenderContext,
    World,
};

use crate::levels;

pub const MANIFEST: &str = include_str!("../assets/manifest.json");

/// Meadow: clear every enemy to move on, dash through them to win coins.
pub struct Meadow {
    /// None when the embedded assets failed to load; the game then idles.
    world: Option<World>,
    config: GameConfig,
}

impl Meadow {
    pub fn new() -> Self {
        let config = GameConfig::default();
        let world = match build_world(&config) {
            Ok(world) => Some(world),
            Err(err) => {
                log::error!("meadow: cannot build world: {err}");
                None
            }
        };
        Self { world, config }
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }
}

impl Default for Meadow {
    fn default() -> Self {
        Self::new()
    }
}

fn build_world(config: &GameConfig) -> Result<World, AssetError> {
    let registry = AssetRegistry::from_json(MANIFEST)?;
    let catalog = Catalog::load(&registry)?;
    let levels = levels::build(&registry)?;
    World::new(catalog, levels, config.clone())
}

impl Game for Meadow {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Some(world) = &mut self.world {
            world.init(ctx);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if let Some(world) = &mut self.world {
            world.update(ctx, input);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        if let Some(world) = &self.world {
            world.render(ctx);
        }
    }
}
