use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::enemy::EnemyBlueprint;
use super::environment::EnvironmentKind;
use super::powerup::PowerUpKind;

/// Source of every random roll the simulation makes. Swap in a scripted factory to get
/// deterministic games.
pub trait EntityFactory {
    /// Roll the variant, health and speed of the next enemy
    fn enemy(&mut self) -> EnemyBlueprint;

    fn powerup_kind(&mut self) -> PowerUpKind;

    fn environment(&mut self) -> EnvironmentKind;

    /// Uniform sample in `[0, 1)` for cosmetic scatter (prop placement, float phases)
    fn scatter(&mut self) -> f32;
}

/// Rolls entities from a seedable RNG
#[derive(Debug, Clone)]
pub struct RandomFactory {
    rng: StdRng,
    normal_radius: f32,
    heavy_radius: f32,
}

impl RandomFactory {
    pub fn new(normal_radius: f32, heavy_radius: f32) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            normal_radius,
            heavy_radius,
        }
    }

    /// Deterministic factory with the stock collision radii
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            normal_radius: 1.5,
            heavy_radius: 2.5,
        }
    }

    pub fn with_radii(mut self, normal_radius: f32, heavy_radius: f32) -> Self {
        self.normal_radius = normal_radius;
        self.heavy_radius = heavy_radius;
        self
    }
}

impl Default for RandomFactory {
    fn default() -> Self {
        Self::new(1.5, 2.5)
    }
}

impl EntityFactory for RandomFactory {
    fn enemy(&mut self) -> EnemyBlueprint {
        let fat = self.rng.random_bool(0.15);
        let crawling = self.rng.random_bool(0.2);
        let baby = !fat && !crawling && self.rng.random_bool(0.2);

        let mut blueprint = EnemyBlueprint::from_traits(
            fat,
            crawling,
            baby,
            self.normal_radius,
            self.heavy_radius,
        );
        blueprint.phase_offset = self.rng.random_range(0.0..std::f32::consts::TAU);
        blueprint.animation_rate = self.rng.random_range(0.8..1.2);
        blueprint
    }

    fn powerup_kind(&mut self) -> PowerUpKind {
        if self.rng.random_bool(0.5) {
            PowerUpKind::FireRate
        } else {
            PowerUpKind::UnitGain
        }
    }

    fn environment(&mut self) -> EnvironmentKind {
        if self.rng.random_bool(0.5) {
            EnvironmentKind::CrystalCaverns
        } else {
            EnvironmentKind::Desert
        }
    }

    fn scatter(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}
