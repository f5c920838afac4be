//! Per-tick movement and pseudo-3D depth.
//!
//! Every rate is expressed per 60 fps frame and scaled by the real frame delta, so a slow
//! frame moves things further instead of slowing the game down.

use crate::config::GameConfig;
use crate::entities::{Enemy, PowerUp, Projectile};

/// Frames per second the tuned speeds assume
pub const REFERENCE_FPS: f32 = 60.0;

/// Depth for a position `y` on its way from `from_y` to `to_y`.
///
/// Progress is clamped to `[0, 1]`, so anything before the start sits at `from_depth` and
/// anything past the end at `to_depth`.
pub fn interpolate_depth(y: f32, from_y: f32, to_y: f32, from_depth: f32, to_depth: f32) -> f32 {
    let span = from_y - to_y;
    let t = if span.abs() <= f32::EPSILON {
        1.0
    } else {
        ((from_y - y) / span).clamp(0.0, 1.0)
    };
    from_depth + (to_depth - from_depth) * t
}

/// Distance covered in one tick at `speed` units per reference frame
pub fn step(speed: f32, delta_secs: f32) -> f32 {
    speed * delta_secs * REFERENCE_FPS
}

pub fn advance_enemies(enemies: &mut [Enemy], config: &GameConfig, delta_secs: f32) {
    for enemy in enemies {
        enemy.y -= step(config.enemy_speed * enemy.speed.multiplier(), delta_secs);
        enemy.depth = interpolate_depth(
            enemy.y,
            config.enemy_spawn_y,
            config.player_y,
            config.perspective_start_depth,
            config.perspective_end_depth,
        );
    }
}

/// Moves power-ups toward the player and drops the ones that drifted past
pub fn advance_powerups(powerups: &mut Vec<PowerUp>, config: &GameConfig, delta_secs: f32) {
    for powerup in powerups.iter_mut() {
        powerup.y -= step(config.powerup_speed, delta_secs);
        powerup.depth = interpolate_depth(
            powerup.y,
            config.powerup_spawn_y,
            config.player_y,
            config.perspective_start_depth,
            config.perspective_end_depth,
        );
    }
    let floor_y = config.player_y - config.cull_margin;
    powerups.retain(|p| !p.is_out_of_bounds(floor_y));
}

/// Moves projectiles away from the player; they recede from their firing depth back to the
/// horizon and vanish above the ceiling
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, config: &GameConfig, delta_secs: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.y += step(config.bullet_speed, delta_secs);
        projectile.depth = interpolate_depth(
            projectile.y,
            projectile.origin_y,
            config.projectile_ceiling_y,
            projectile.origin_depth,
            config.perspective_start_depth,
        );
    }
    projectiles.retain(|p| !p.is_out_of_bounds(config.projectile_ceiling_y));
}
