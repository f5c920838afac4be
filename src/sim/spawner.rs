//! Wave and power-up scheduling, sized against the squad's current firepower.

use log::{debug, info};

use super::events::GameEvent;
use super::motion::interpolate_depth;
use super::world::World;
use crate::config::GameConfig;
use crate::entities::{Enemy, EntityFactory, GameState, Lane, PowerUp, Projectile};

/// Lane every enemy wave marches down
pub const ENEMY_LANE: Lane = Lane::Left;
/// Lane power-ups drift down
pub const POWERUP_LANE: Lane = ENEMY_LANE.opposite();

/// Share of the lane width a wave is scattered across
const WAVE_JITTER: f32 = 0.8;

/// Enemies in the next wave: the squad's spare output over one spawn window, minus what the
/// live enemies already soak up, turned into a head count at the assumed average health.
pub fn enemy_wave_size(state: &GameState, config: &GameConfig) -> u32 {
    let total = state.bullets_per_second() * (config.enemy_spawn_interval_ms / 1000.0);
    let spare = total - f64::from(state.enemy_firepower);
    let target = (spare * config.wave_fill_ratio).floor().max(0.0);
    ((target / config.assumed_enemy_health).floor() as u32).max(1)
}

/// Hits a new power-up takes to collect, relative to what the squad can fire while it
/// drifts past
pub fn powerup_hit_count(state: &GameState, config: &GameConfig) -> u32 {
    let shots = state.bullets_per_second() * (config.travel_time_ms / 1000.0);
    let hits = (shots * config.powerup_hit_ratio).ceil().max(0.0) as u32;
    hits.clamp(config.min_powerup_hits, config.max_powerup_hits)
}

/// Vertical span a wave of `count` enemies is spread over
pub fn wave_spread(count: u32) -> f32 {
    (count as f32 * 0.5).clamp(2.0, 4.0)
}

/// Whether a timer last reset at `last_ms` is due again
pub fn is_due(last_ms: Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
    match last_ms {
        Some(last) => now_ms - last > interval_ms,
        None => true,
    }
}

pub fn spawn_wave<F: EntityFactory>(world: &mut World, config: &GameConfig, factory: &mut F) {
    let count = enemy_wave_size(&world.state, config);
    let spread = wave_spread(count);
    let center_x = config.lane_center(ENEMY_LANE);

    for i in 0..count {
        let blueprint = factory.enemy();
        let jitter = (factory.scatter() - 0.5) * config.lane_width * WAVE_JITTER;
        let y = if count > 1 {
            config.enemy_spawn_y + spread / 2.0 - spread * i as f32 / (count - 1) as f32
        } else {
            config.enemy_spawn_y
        };
        let depth = interpolate_depth(
            y,
            config.enemy_spawn_y,
            config.player_y,
            config.perspective_start_depth,
            config.perspective_end_depth,
        );

        let id = world.next_id();
        let enemy = Enemy::new(id, center_x + jitter, y, depth, blueprint);
        world.state.add_enemy(enemy.health);
        world.enemies.push(enemy);
    }

    world.state.waves_spawned += 1;
    info!(
        "Wave {}: {} enemies, firepower budget {}",
        world.state.waves_spawned, count, world.state.enemy_firepower
    );
    world.events.push(GameEvent::WaveSpawned {
        wave: world.state.waves_spawned,
        enemies: count,
    });
}

pub fn spawn_powerup<F: EntityFactory>(world: &mut World, config: &GameConfig, factory: &mut F) {
    let hits = powerup_hit_count(&world.state, config);
    let kind = factory.powerup_kind();
    let id = world.next_id();
    world.powerups.push(PowerUp::new(
        id,
        config.lane_center(POWERUP_LANE),
        config.powerup_spawn_y,
        config.perspective_start_depth,
        kind,
        hits,
    ));
    debug!("{} power-up spawned needing {} hits", kind.get_name(), hits);
    world.events.push(GameEvent::PowerUpSpawned { kind, hits });
}

/// One projectile per unit, from just ahead of each unit
pub fn fire_volley(world: &mut World, config: &GameConfig) {
    let (dx, dy) = config.muzzle_offset;
    let origins: Vec<(f32, f32)> = world
        .formation
        .units
        .iter()
        .map(|unit| (unit.x + dx, unit.y + dy))
        .collect();

    for (x, y) in &origins {
        let id = world.next_id();
        world
            .projectiles
            .push(Projectile::new(id, *x, *y, config.perspective_end_depth));
    }

    debug!("Volley of {} projectiles", origins.len());
    world.events.push(GameEvent::VolleyFired {
        projectiles: origins.len() as u32,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RandomFactory;

    #[test]
    fn test_opening_wave_is_one_enemy() {
        // 0.5 bullets/s over 5 s = 2.5 spare, 80% floored = 2, at 2 health each = 1 enemy
        let config = GameConfig::default();
        let state = GameState::new(config.fire_interval_ms);
        assert_eq!(enemy_wave_size(&state, &config), 1);
    }

    #[test]
    fn test_wave_size_grows_with_firepower() {
        let config = GameConfig::default();
        let mut state = GameState::new(500.0);
        state.player_units = 4;
        // 8 bullets/s * 5 s = 40, 80% = 32, / 2 = 16
        assert_eq!(enemy_wave_size(&state, &config), 16);

        state.enemy_firepower = 20;
        // 20 spare * 0.8 = 16, / 2 = 8
        assert_eq!(enemy_wave_size(&state, &config), 8);
    }

    #[test]
    fn test_wave_size_never_below_one() {
        let config = GameConfig::default();
        let mut state = GameState::new(config.fire_interval_ms);
        state.enemy_firepower = 500;
        assert_eq!(enemy_wave_size(&state, &config), 1);
    }

    #[test]
    fn test_powerup_hits_are_clamped() {
        let config = GameConfig::default();
        let mut state = GameState::new(config.fire_interval_ms);
        // 0.5 * 11 * 0.6 = 3.3 -> 4
        assert_eq!(powerup_hit_count(&state, &config), 4);

        state.player_units = 20;
        state.fire_interval_ms = 200.0;
        assert_eq!(powerup_hit_count(&state, &config), 15);

        state.player_units = 0;
        assert_eq!(powerup_hit_count(&state, &config), 2);
    }

    #[test]
    fn test_wave_spread() {
        assert_eq!(wave_spread(1), 2.0);
        assert_eq!(wave_spread(6), 3.0);
        assert_eq!(wave_spread(30), 4.0);
    }

    #[test]
    fn test_is_due() {
        assert!(is_due(None, 0.0, 5000.0));
        assert!(!is_due(Some(0.0), 5000.0, 5000.0));
        assert!(is_due(Some(0.0), 5000.5, 5000.0));
    }

    #[test]
    fn test_spawn_wave_fills_enemy_lane() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        world.state.player_units = 4;
        world.state.fire_interval_ms = 500.0;
        let mut factory = RandomFactory::seeded(1);

        spawn_wave(&mut world, &config, &mut factory);

        assert_eq!(world.enemies.len(), 16);
        assert_eq!(world.state.live_enemies, 16);
        assert_eq!(world.state.waves_spawned, 1);
        let health: u32 = world.enemies.iter().map(|e| e.health).sum();
        assert_eq!(world.state.enemy_firepower, health);
        for enemy in &world.enemies {
            assert_eq!(enemy.lane(), ENEMY_LANE);
            assert!(enemy.y <= config.enemy_spawn_y + 2.0 + 1e-5);
            assert!(enemy.y >= config.enemy_spawn_y - 2.0 - 1e-5);
        }
        assert_eq!(
            world.events,
            vec![GameEvent::WaveSpawned {
                wave: 1,
                enemies: 16
            }]
        );
    }

    #[test]
    fn test_spawn_powerup_in_powerup_lane() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        let mut factory = RandomFactory::seeded(2);
        spawn_powerup(&mut world, &config, &mut factory);
        assert_eq!(world.powerups.len(), 1);
        assert_eq!(world.powerups[0].lane(), POWERUP_LANE);
        assert_eq!(world.powerups[0].hits_remaining(), 4);
    }

    #[test]
    fn test_volley_fires_from_every_unit() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        world.state.player_units = 3;
        world.rebuild_formation(1.0);
        fire_volley(&mut world, &config);

        assert_eq!(world.projectiles.len(), 3);
        for (shot, unit) in world.projectiles.iter().zip(&world.formation.units) {
            assert!((shot.x - (unit.x + 0.3)).abs() < 1e-6);
            assert!((shot.y - (unit.y + 0.3)).abs() < 1e-6);
        }
    }
}
