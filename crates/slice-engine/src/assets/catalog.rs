//! Assets resolved once when a world is built.
//!
//! After loading, switching an actor's action or spawning a particle is an
//! infallible array/field lookup.

use crate::assets::error::AssetError;
use crate::assets::registry::AssetProvider;
use crate::components::animation::Clip;
use crate::components::sprite::Image;
use crate::entities::body::Action;
use crate::systems::effects::particle::ParticleKind;

/// One clip template per action for a single actor type.
#[derive(Debug, Clone)]
pub struct ClipSet {
    clips: [Clip; Action::COUNT],
}

impl ClipSet {
    /// Resolve `"{actor}/{action}"` for every action. `idle` is required;
    /// any other missing action plays the idle clip.
    pub fn load(provider: &impl AssetProvider, actor: &str) -> Result<Self, AssetError> {
        let idle = provider
            .clip_template(&format!("{actor}/{}", Action::Idle.name()))?
            .fresh();
        let clips = Action::ALL.map(|action| {
            let key = format!("{actor}/{}", action.name());
            match provider.clip_template(&key) {
                Ok(clip) => clip.fresh(),
                Err(_) => {
                    log::debug!("{key} not found, using idle");
                    idle.fresh()
                }
            }
        });
        Ok(Self { clips })
    }

    /// Template for `action`.
    pub fn get(&self, action: Action) -> &Clip {
        &self.clips[action as usize]
    }
}

/// Clip templates for each particle kind.
#[derive(Debug, Clone)]
pub struct ParticleClips {
    pub dust: Clip,
    pub leaf: Clip,
    pub blood: Clip,
    pub coin: Clip,
}

impl ParticleClips {
    /// `particle/particle` is required; leaf, blood and coin fall back to it.
    pub fn load(provider: &impl AssetProvider) -> Result<Self, AssetError> {
        let dust = provider.clip_template("particle/particle")?.fresh();
        let or_dust = |key: &str| match provider.clip_template(key) {
            Ok(clip) => clip.fresh(),
            Err(_) => {
                log::debug!("{key} not found, using particle/particle");
                dust.fresh()
            }
        };
        Ok(Self {
            leaf: or_dust("particle/leaf"),
            blood: or_dust("particle/blood"),
            coin: or_dust("particle/coin"),
            dust,
        })
    }

    pub fn get(&self, kind: &ParticleKind) -> &Clip {
        match kind {
            ParticleKind::Dust => &self.dust,
            ParticleKind::Leaf => &self.leaf,
            ParticleKind::Blood => &self.blood,
            ParticleKind::Coin(_) => &self.coin,
        }
    }
}

/// Every asset the simulation and draw pass touch.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub player: ClipSet,
    pub enemy: ClipSet,
    pub particles: ParticleClips,
    pub background: Image,
    pub gun: Image,
    pub projectile: Image,
    /// Cloud variants, possibly empty.
    pub clouds: Vec<Image>,
}

impl Catalog {
    pub fn load(provider: &impl AssetProvider) -> Result<Self, AssetError> {
        Ok(Self {
            player: ClipSet::load(provider, "player")?,
            enemy: ClipSet::load(provider, "enemy")?,
            particles: ParticleClips::load(provider)?,
            background: provider.image("background")?,
            gun: provider.image("gun")?,
            projectile: provider.image("projectile")?,
            clouds: provider.image_group("clouds/"),
        })
    }
}
