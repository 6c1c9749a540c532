//! Transient effects: sparks, particles and projectiles.
//!
//! `EffectsState` owns the live collections. Entities never push into them
//! directly; they go through `WorldContext`, and the world drains and
//! compacts each collection once per tick.

pub mod burst;
pub mod particle;
pub mod projectile;
pub mod spark;

pub use particle::{CoinFlight, CoinPhase, Particle, ParticleKind, ParticleStatus};
pub use projectile::Projectile;
pub use spark::Spark;

use crate::core::rng::Rng;

/// Container for all live effects plus the RNG they draw from.
pub struct EffectsState {
    pub sparks: Vec<Spark>,
    pub particles: Vec<Particle>,
    pub projectiles: Vec<Projectile>,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            sparks: Vec::new(),
            particles: Vec::new(),
            projectiles: Vec::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Drop every live effect. The RNG keeps its state.
    pub fn clear(&mut self) {
        self.sparks.clear();
        self.particles.clear();
        self.projectiles.clear();
    }

    /// Advance sparks, removing the ones that stopped.
    pub fn tick_sparks(&mut self) {
        self.sparks.retain_mut(|s| s.update());
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty() && self.particles.is_empty() && self.projectiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn tick_sparks_compacts() {
        let mut fx = EffectsState::new(1);
        fx.sparks.push(Spark::new(Vec2::ZERO, 0.0, 0.1));
        fx.sparks.push(Spark::new(Vec2::ZERO, 0.0, 3.0));
        fx.tick_sparks();
        assert_eq!(fx.sparks.len(), 1);
        assert!((fx.sparks[0].speed - 2.9).abs() < 1e-6);
    }

    #[test]
    fn clear_empties_collections() {
        let mut fx = EffectsState::new(1);
        fx.projectiles.push(Projectile::new(Vec2::ZERO, Vec2::X));
        fx.clear();
        assert!(fx.is_empty());
    }
}
