use crate::config::GameConfig;
use crate::entities::{Enemy, Formation, GameState, Lane, PowerUp, Projectile};

use super::events::GameEvent;

/// Everything that changes while a session runs. Spawn order is preserved in every
/// collection.
#[derive(Debug, Clone)]
pub struct World {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub formation: Formation,
    pub state: GameState,
    /// Where the formation is heading this tick
    pub target_x: f32,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let state = GameState::new(config.fire_interval_ms);
        // The squad starts between the two lanes
        let center_x = pointer_target(0.5, config);
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            formation: Formation::new(
                state.player_units as usize,
                center_x,
                config.player_y,
                config.formation_spacing,
            ),
            state,
            target_x: center_x,
            events: Vec::new(),
            next_id: 0,
        }
    }

    pub fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Rebuild the formation for the current unit count around `center_x`
    pub fn rebuild_formation(&mut self, center_x: f32) {
        self.formation
            .recompute(self.state.player_units as usize, center_x);
    }
}

/// Clamp a raw pointer reading to `[0, 1]`; NaN centers it
pub fn clamp_pointer(pointer: f32) -> f32 {
    if pointer.is_nan() {
        0.5
    } else {
        pointer.clamp(0.0, 1.0)
    }
}

/// World x the formation should head for given a pointer reading. The pointer spans the two
/// lane centers.
pub fn pointer_target(pointer: f32, config: &GameConfig) -> f32 {
    let left = config.lane_center(Lane::Left);
    let right = config.lane_center(Lane::Right);
    left + (right - left) * clamp_pointer(pointer)
}
