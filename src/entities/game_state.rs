#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
    Victory,
}

/// Aggregate counters for one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player_units: u32,
    pub live_enemies: u32,
    /// Sum of the remaining health of every live enemy
    pub enemy_firepower: u32,
    pub fire_interval_ms: f64,
    pub waves_spawned: u32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(fire_interval_ms: f64) -> Self {
        Self {
            player_units: 1,
            live_enemies: 0,
            enemy_firepower: 0,
            fire_interval_ms,
            waves_spawned: 0,
            phase: GamePhase::Running,
        }
    }

    /// Volleys per second times units, i.e. projectiles the squad puts out each second
    pub fn bullets_per_second(&self) -> f64 {
        (1000.0 / self.fire_interval_ms) * f64::from(self.player_units)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Victory)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn add_enemy(&mut self, health: u32) {
        self.live_enemies += 1;
        self.enemy_firepower += health;
    }

    /// An enemy left play carrying `remaining_health`
    pub fn remove_enemy(&mut self, remaining_health: u32) {
        self.live_enemies = self.live_enemies.saturating_sub(1);
        self.enemy_firepower = self.enemy_firepower.saturating_sub(remaining_health);
    }

    pub fn absorb_hit(&mut self) {
        self.enemy_firepower = self.enemy_firepower.saturating_sub(1);
    }

    pub fn lose_unit(&mut self) {
        self.player_units = self.player_units.saturating_sub(1);
    }

    pub fn gain_unit(&mut self) {
        self.player_units += 1;
    }

    /// Halve the volley interval, never below `min_interval_ms`
    pub fn boost_fire_rate(&mut self, min_interval_ms: f64) {
        self.fire_interval_ms = (self.fire_interval_ms / 2.0).max(min_interval_ms);
    }
}
