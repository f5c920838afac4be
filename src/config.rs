use color_eyre::eyre::{Result, ensure};

use crate::entities::Lane;

/// Tunable game constants. All positions are in world units, all times in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Vertical line the formation stands on
    pub player_y: f32,
    pub lane_width: f32,
    /// Gap between the two lanes
    pub lane_gap: f32,
    pub enemy_spawn_y: f32,
    pub powerup_spawn_y: f32,
    /// Projectiles above this line are discarded
    pub projectile_ceiling_y: f32,
    /// How far past the player line power-ups and props may drift before removal
    pub cull_margin: f32,
    /// Enemies at or below `player_y + contact_tolerance` have reached the formation
    pub contact_tolerance: f32,

    pub enemy_speed: f32,
    pub powerup_speed: f32,
    pub bullet_speed: f32,
    pub player_move_speed: f32,

    pub perspective_start_depth: f32,
    pub perspective_end_depth: f32,

    pub fire_interval_ms: f64,
    pub min_fire_interval_ms: f64,
    pub enemy_spawn_interval_ms: f64,
    pub powerup_spawn_interval_ms: f64,
    /// Expected time for a power-up to drift from its spawn to the player
    pub travel_time_ms: f64,
    pub required_waves: u32,

    pub normal_collision_radius: f32,
    pub heavy_collision_radius: f32,
    pub powerup_hit_range: f32,

    pub formation_spacing: f32,
    /// Projectile spawn offset relative to the firing unit
    pub muzzle_offset: (f32, f32),

    /// Share of spare player firepower a new wave soaks up
    pub wave_fill_ratio: f64,
    pub assumed_enemy_health: f64,
    /// Share of the player's travel-time output a power-up demands
    pub powerup_hit_ratio: f64,
    pub min_powerup_hits: u32,
    pub max_powerup_hits: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_y: -8.0,
            lane_width: 3.6,
            lane_gap: 0.1,
            enemy_spawn_y: 12.0,
            powerup_spawn_y: 12.0,
            projectile_ceiling_y: 30.0,
            cull_margin: 2.0,
            contact_tolerance: 0.5,

            enemy_speed: 0.02,
            powerup_speed: 0.02,
            bullet_speed: 0.2,
            player_move_speed: 0.2,

            perspective_start_depth: 0.0,
            perspective_end_depth: 3.0,

            fire_interval_ms: 2000.0,
            min_fire_interval_ms: 200.0,
            enemy_spawn_interval_ms: 5000.0,
            powerup_spawn_interval_ms: 8000.0,
            travel_time_ms: 11000.0,
            required_waves: 10,

            normal_collision_radius: 1.5,
            heavy_collision_radius: 2.5,
            powerup_hit_range: 1.5,

            formation_spacing: 1.2,
            muzzle_offset: (0.3, 0.3),

            wave_fill_ratio: 0.8,
            assumed_enemy_health: 2.0,
            powerup_hit_ratio: 0.6,
            min_powerup_hits: 2,
            max_powerup_hits: 15,
        }
    }
}

impl GameConfig {
    /// Rejects configurations that would break the spawn and perspective arithmetic
    pub fn validate(&self) -> Result<()> {
        ensure!(self.lane_width > 0.0, "lane width must be positive");
        ensure!(self.lane_gap >= 0.0, "lane gap must not be negative");
        ensure!(
            self.enemy_spawn_y > self.player_y,
            "enemy spawn height {} must be above the player line {}",
            self.enemy_spawn_y,
            self.player_y
        );
        ensure!(
            self.powerup_spawn_y > self.player_y,
            "power-up spawn height {} must be above the player line {}",
            self.powerup_spawn_y,
            self.player_y
        );
        ensure!(
            self.projectile_ceiling_y > self.player_y,
            "projectile ceiling must be above the player line"
        );
        ensure!(
            self.enemy_speed > 0.0
                && self.powerup_speed > 0.0
                && self.bullet_speed > 0.0
                && self.player_move_speed > 0.0,
            "movement speeds must be positive"
        );
        ensure!(
            self.fire_interval_ms > 0.0 && self.min_fire_interval_ms > 0.0,
            "fire intervals must be positive"
        );
        ensure!(
            self.min_fire_interval_ms <= self.fire_interval_ms,
            "minimum fire interval {}ms exceeds the starting interval {}ms",
            self.min_fire_interval_ms,
            self.fire_interval_ms
        );
        ensure!(
            self.enemy_spawn_interval_ms > 0.0 && self.powerup_spawn_interval_ms > 0.0,
            "spawn intervals must be positive"
        );
        ensure!(self.required_waves >= 1, "at least one wave is required");
        ensure!(
            self.assumed_enemy_health > 0.0,
            "assumed enemy health must be positive"
        );
        ensure!(
            self.min_powerup_hits >= 1 && self.min_powerup_hits <= self.max_powerup_hits,
            "power-up hit range [{}, {}] is empty",
            self.min_powerup_hits,
            self.max_powerup_hits
        );
        Ok(())
    }

    /// Horizontal center of a lane
    pub fn lane_center(&self, lane: Lane) -> f32 {
        let offset = self.lane_width / 2.0 + self.lane_gap;
        match lane {
            Lane::Left => -offset,
            Lane::Right => offset,
        }
    }

    /// Outer edge of the left lane (half a lane beyond its center)
    pub fn scene_left(&self) -> f32 {
        self.lane_center(Lane::Left) - self.lane_width / 2.0
    }

    /// Outer edge of the right lane
    pub fn scene_right(&self) -> f32 {
        self.lane_center(Lane::Right) + self.lane_width / 2.0
    }

    /// Leftmost visible world x, leaving room for scenery beside the lanes
    pub fn view_left(&self) -> f32 {
        self.scene_left() - (self.lane_width / 2.0 + 2.0)
    }

    pub fn view_right(&self) -> f32 {
        self.scene_right() + (self.lane_width / 2.0 + 2.0)
    }
}
