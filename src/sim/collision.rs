//! Contact, projectile hits and power-up effects.
//!
//! Projectiles only interact with targets in their own lane. Every collection is walked in
//! spawn order and each projectile lands at most one hit per tick.

use log::{debug, info};

use super::events::GameEvent;
use super::world::World;
use crate::config::GameConfig;
use crate::entities::{PowerUp, PowerUpKind};

/// Removes every enemy that reached the player line. Each one costs exactly one unit.
///
/// Returns true once the squad is wiped out.
pub fn resolve_contacts(world: &mut World, config: &GameConfig) -> bool {
    let contact_y = config.player_y + config.contact_tolerance;
    let mut lost_units = false;

    let mut i = 0;
    while i < world.enemies.len() {
        if world.enemies[i].y > contact_y {
            i += 1;
            continue;
        }
        let enemy = world.enemies.remove(i);
        world.state.remove_enemy(enemy.health);
        world.state.lose_unit();
        lost_units = true;
        info!(
            "Enemy {} reached the squad, {} units left",
            enemy.id, world.state.player_units
        );
        world.events.push(GameEvent::EnemyReachedPlayer {
            id: enemy.id,
            units_left: world.state.player_units,
        });
        if world.state.player_units == 0 {
            break;
        }
    }

    if lost_units {
        let center_x = world.formation.center_x().unwrap_or(world.target_x);
        world.rebuild_formation(center_x);
    }
    world.state.player_units == 0
}

/// Resolves projectile hits against enemies first, then power-ups
pub fn resolve_projectiles(world: &mut World, config: &GameConfig) {
    let mut i = 0;
    while i < world.projectiles.len() {
        let lane = world.projectiles[i].lane();
        let y = world.projectiles[i].y;

        if let Some(target) = world
            .enemies
            .iter()
            .position(|e| e.lane() == lane && e.in_reach(y))
        {
            world.projectiles.remove(i);
            hit_enemy(world, target);
            continue;
        }

        if let Some(target) = world
            .powerups
            .iter()
            .position(|p| p.lane() == lane && p.in_reach(y, config.powerup_hit_range))
        {
            world.projectiles.remove(i);
            hit_powerup(world, config, target);
            continue;
        }

        i += 1;
    }
}

fn hit_enemy(world: &mut World, index: usize) {
    let enemy = &mut world.enemies[index];
    enemy.take_damage(1);
    world.state.absorb_hit();

    if enemy.is_alive() {
        world.events.push(GameEvent::EnemyHit {
            id: enemy.id,
            health_left: enemy.health,
        });
        return;
    }

    let enemy = world.enemies.remove(index);
    // Its last point of health was already taken off the budget
    world.state.remove_enemy(0);
    world.events.push(GameEvent::EnemyDestroyed {
        id: enemy.id,
        kind: enemy.kind,
    });
}

fn hit_powerup(world: &mut World, config: &GameConfig, index: usize) {
    let powerup = &mut world.powerups[index];
    if !powerup.take_hit() {
        world.events.push(GameEvent::PowerUpHit {
            id: powerup.id,
            hits_left: powerup.hits_remaining(),
        });
        return;
    }

    let powerup = world.powerups.remove(index);
    apply_powerup(world, config, &powerup);
}

/// Applies the effect of a collected power-up
pub fn apply_powerup(world: &mut World, config: &GameConfig, powerup: &PowerUp) {
    match powerup.kind {
        PowerUpKind::FireRate => {
            world.state.boost_fire_rate(config.min_fire_interval_ms);
            debug!("Fire interval now {}ms", world.state.fire_interval_ms);
        }
        PowerUpKind::UnitGain => {
            world.state.gain_unit();
            world.rebuild_formation(world.target_x);
            debug!("Squad grew to {} units", world.state.player_units);
        }
    }
    world.events.push(GameEvent::PowerUpCollected { kind: powerup.kind });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Enemy, EnemyBlueprint, EnemyKind, Projectile};

    fn world_with_enemy(kind: EnemyKind, x: f32, y: f32) -> World {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        let enemy = Enemy::new(100, x, y, 0.0, EnemyBlueprint::for_kind(kind, 1.5, 2.5));
        world.state.add_enemy(enemy.health);
        world.enemies.push(enemy);
        world
    }

    #[test]
    fn test_hit_in_same_lane() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Crawling, -1.9, 5.0);
        world.projectiles.push(Projectile::new(1, -1.6, 4.0, 3.0));

        resolve_projectiles(&mut world, &config);

        assert!(world.projectiles.is_empty());
        assert_eq!(world.enemies[0].health, 2);
        assert_eq!(world.state.enemy_firepower, 2);
        assert_eq!(world.state.live_enemies, 1);
    }

    #[test]
    fn test_other_lane_is_ignored() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Normal, -1.9, 5.0);
        world.projectiles.push(Projectile::new(1, 1.9, 5.0, 3.0));

        resolve_projectiles(&mut world, &config);

        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.enemies[0].health, 1);
    }

    #[test]
    fn test_out_of_reach_is_ignored() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Normal, -1.9, 5.0);
        world.projectiles.push(Projectile::new(1, -1.6, 3.5, 3.0));
        resolve_projectiles(&mut world, &config);
        assert_eq!(world.projectiles.len(), 1);

        // The heavy radius reaches further
        let mut world = world_with_enemy(EnemyKind::Fat, -1.9, 5.0);
        world.projectiles.push(Projectile::new(1, -1.6, 3.5, 3.0));
        resolve_projectiles(&mut world, &config);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_each_projectile_hits_once() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Normal, -1.9, 5.0);
        let second = Enemy::new(
            101,
            -1.5,
            5.2,
            0.0,
            EnemyBlueprint::for_kind(EnemyKind::Normal, 1.5, 2.5),
        );
        world.state.add_enemy(second.health);
        world.enemies.push(second);
        world.projectiles.push(Projectile::new(1, -1.6, 5.0, 3.0));

        resolve_projectiles(&mut world, &config);

        // The first enemy in spawn order takes the hit, the second is untouched
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].id, 101);
        assert_eq!(world.state.live_enemies, 1);
        assert_eq!(world.state.enemy_firepower, 1);
    }

    #[test]
    fn test_simultaneous_hits_are_not_batched() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Fat, -1.9, 5.0);
        for id in 0..3 {
            world.projectiles.push(Projectile::new(id, -1.6, 5.0, 3.0));
        }
        resolve_projectiles(&mut world, &config);
        assert_eq!(world.enemies[0].health, 2);
        assert_eq!(world.state.enemy_firepower, 2);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_enemy_shields_powerup() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        let enemy = Enemy::new(
            1,
            1.0,
            5.0,
            0.0,
            EnemyBlueprint::for_kind(EnemyKind::Normal, 1.5, 2.5),
        );
        world.state.add_enemy(1);
        world.enemies.push(enemy);
        world
            .powerups
            .push(PowerUp::new(2, 1.9, 5.0, 0.0, PowerUpKind::FireRate, 2));
        world.projectiles.push(Projectile::new(3, 1.6, 5.0, 3.0));

        resolve_projectiles(&mut world, &config);

        assert!(world.enemies.is_empty());
        assert_eq!(world.powerups[0].hits_remaining(), 2);
    }

    #[test]
    fn test_contact_costs_one_unit_regardless_of_health() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Fat, -1.9, config.player_y + 0.4);
        world.state.player_units = 3;
        world.rebuild_formation(0.0);

        let wiped = resolve_contacts(&mut world, &config);

        assert!(!wiped);
        assert_eq!(world.state.player_units, 2);
        assert_eq!(world.formation.len(), 2);
        assert_eq!(world.state.live_enemies, 0);
        assert_eq!(world.state.enemy_firepower, 0);
    }

    #[test]
    fn test_contact_tolerance() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Normal, -1.9, config.player_y + 0.6);
        assert!(!resolve_contacts(&mut world, &config));
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.state.player_units, 1);
    }

    #[test]
    fn test_last_unit_lost() {
        let config = GameConfig::default();
        let mut world = world_with_enemy(EnemyKind::Normal, -1.9, config.player_y);
        assert!(resolve_contacts(&mut world, &config));
        assert_eq!(world.state.player_units, 0);
        assert!(world.formation.is_empty());
    }

    #[test]
    fn test_fire_rate_powerup() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        world
            .powerups
            .push(PowerUp::new(1, 1.9, 5.0, 0.0, PowerUpKind::FireRate, 2));
        world.projectiles.push(Projectile::new(2, 1.6, 5.0, 3.0));
        world.projectiles.push(Projectile::new(3, 1.6, 5.0, 3.0));
        world.projectiles.push(Projectile::new(4, 1.6, 5.0, 3.0));

        resolve_projectiles(&mut world, &config);

        assert!(world.powerups.is_empty());
        assert_eq!(world.state.fire_interval_ms, 1000.0);
        // The third projectile found nothing left to hit
        assert_eq!(world.projectiles.len(), 1);
        assert!(world.events.contains(&GameEvent::PowerUpHit { id: 1, hits_left: 1 }));
        assert!(world.events.contains(&GameEvent::PowerUpCollected {
            kind: PowerUpKind::FireRate
        }));
    }

    #[test]
    fn test_unit_gain_rebuilds_formation_on_target() {
        let config = GameConfig::default();
        let mut world = World::new(&config);
        world.target_x = 1.0;
        let powerup = PowerUp::new(1, 1.9, 5.0, 0.0, PowerUpKind::UnitGain, 1);

        apply_powerup(&mut world, &config, &powerup);

        assert_eq!(world.state.player_units, 2);
        assert_eq!(world.formation.len(), 2);
        let center = world.formation.center_x().unwrap();
        assert!((center - 1.0).abs() < 1e-5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_lanes_never_cross(
                enemy_x in -3.7f32..-0.01,
                enemy_y in -8.0f32..14.0,
                shot_x in 0.0f32..3.7,
                shot_ys in prop::collection::vec(-8.0f32..30.0, 1..8)
            ) {
                let config = GameConfig::default();
                let mut world = world_with_enemy(EnemyKind::Fat, enemy_x, enemy_y);
                for (id, y) in shot_ys.iter().enumerate() {
                    world.projectiles.push(Projectile::new(id as u32, shot_x, *y, 3.0));
                }

                resolve_projectiles(&mut world, &config);

                prop_assert_eq!(world.enemies.len(), 1);
                prop_assert_eq!(world.enemies[0].health, 5);
                prop_assert_eq!(world.projectiles.len(), shot_ys.len());
            }
        }
    }
}
