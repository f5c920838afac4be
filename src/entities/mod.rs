mod enemy;
mod environment;
mod factory;
mod formation;
mod game_state;
mod lane;
mod powerup;
mod projectile;

// Re-export all public types
pub use enemy::{Enemy, EnemyBlueprint, EnemyKind, Pose, SpeedClass};
pub use environment::{Environment, EnvironmentKind, PROP_VARIANTS, Prop};
pub use factory::{EntityFactory, RandomFactory};
pub use formation::{Formation, Unit, formation_offsets};
pub use game_state::{GamePhase, GameState};
pub use lane::Lane;
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::Projectile;
