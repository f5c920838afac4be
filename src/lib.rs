// Library exports for testing
pub use config::GameConfig;
pub use entities::{
    Enemy, EnemyBlueprint, EnemyKind, EntityFactory, Formation, GamePhase, GameState, Lane,
    PowerUp, PowerUpKind, Projectile, RandomFactory, SpeedClass,
};
pub use sim::{GameEvent, Outcome, Session};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;
