//! Events emitted by the simulation for audio and HUD feedback.

use crate::entities::{EnemyKind, PowerUpKind};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    GameOver,
    Victory,
}

impl Outcome {
    /// Text for the end screen
    pub fn message(self) -> &'static str {
        match self {
            Outcome::GameOver => "Game Over!",
            Outcome::Victory => "Victory!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new wave entered the enemy lane.
    WaveSpawned { wave: u32, enemies: u32 },
    PowerUpSpawned { kind: PowerUpKind, hits: u32 },
    /// The squad fired one projectile per unit.
    VolleyFired { projectiles: u32 },
    EnemyHit { id: u32, health_left: u32 },
    EnemyDestroyed { id: u32, kind: EnemyKind },
    /// An enemy walked into the formation and took a unit with it.
    EnemyReachedPlayer { id: u32, units_left: u32 },
    PowerUpHit { id: u32, hits_left: u32 },
    PowerUpCollected { kind: PowerUpKind },
    /// Emitted exactly once per session.
    Ended(Outcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::GameOver.message(), "Game Over!");
        assert_eq!(Outcome::Victory.message(), "Victory!");
    }
}
