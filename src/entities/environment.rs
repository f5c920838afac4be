use log::warn;

use super::factory::EntityFactory;
use super::lane::Lane;
use crate::config::GameConfig;
use crate::sim::motion::{interpolate_depth, step};

/// Number of prop shapes each environment ships with
pub const PROP_VARIANTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKind {
    CrystalCaverns,
    Desert,
}

impl EnvironmentKind {
    pub fn get_name(&self) -> &'static str {
        match self {
            EnvironmentKind::CrystalCaverns => "Crystal Caverns",
            EnvironmentKind::Desert => "Desert",
        }
    }

    fn initial_props(self) -> usize {
        match self {
            EnvironmentKind::CrystalCaverns => 4,
            EnvironmentKind::Desert => 2,
        }
    }

    /// Height where props enter the scene (depth starts here)
    fn horizon_y(self, config: &GameConfig) -> f32 {
        match self {
            EnvironmentKind::CrystalCaverns => config.enemy_spawn_y,
            EnvironmentKind::Desert => config.player_y + 12.0,
        }
    }
}

/// Scenery drifting past outside the lanes. Purely cosmetic.
#[derive(Debug, Clone)]
pub struct Prop {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    /// Which of the environment's prop shapes this is
    pub variant: usize,
    pub float_offset: f32,
    float_phase: f32,
    float_speed: f32,
    /// Accumulated spin in radians
    pub spin: f32,
    spin_speed: f32,
    respawn_at_ms: Option<f64>,
}

impl Prop {
    /// Height to draw at, including the float bob
    pub fn display_y(&self) -> f32 {
        self.y + self.float_offset
    }

    pub fn is_waiting(&self) -> bool {
        self.respawn_at_ms.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Environment {
    pub kind: EnvironmentKind,
    pub props: Vec<Prop>,
    catalog_size: usize,
}

impl Environment {
    pub fn new<F: EntityFactory>(kind: EnvironmentKind, config: &GameConfig, factory: &mut F) -> Self {
        Self::with_catalog(kind, PROP_VARIANTS, config, factory)
    }

    /// Build an environment from `catalog_size` loaded prop shapes. An empty catalog yields a
    /// bare environment.
    pub fn with_catalog<F: EntityFactory>(
        kind: EnvironmentKind,
        catalog_size: usize,
        config: &GameConfig,
        factory: &mut F,
    ) -> Self {
        let mut environment = Self {
            kind,
            props: Vec::new(),
            catalog_size,
        };

        if catalog_size == 0 {
            warn!("{} has no props loaded, running without scenery", kind.get_name());
            return environment;
        }

        for i in 0..kind.initial_props() {
            let y = match kind {
                EnvironmentKind::CrystalCaverns => {
                    config.enemy_spawn_y - i as f32 * 15.0 + (factory.scatter() - 0.5) * 3.0
                }
                EnvironmentKind::Desert => kind.horizon_y(config) + factory.scatter() * 5.0,
            };
            let prop = environment.make_prop(y, config, factory);
            environment.props.push(prop);
        }
        environment
    }

    fn make_prop<F: EntityFactory>(&self, y: f32, config: &GameConfig, factory: &mut F) -> Prop {
        let side = if factory.scatter() < 0.5 {
            Lane::Left
        } else {
            Lane::Right
        };
        let variation = match self.kind {
            EnvironmentKind::CrystalCaverns => factory.scatter() * 2.0 - 1.0,
            EnvironmentKind::Desert => 0.0,
        };
        let variant = ((factory.scatter() * self.catalog_size as f32) as usize)
            .min(self.catalog_size.saturating_sub(1));

        Prop {
            x: outside_lane_x(side, config) + variation,
            y,
            depth: config.perspective_start_depth,
            variant,
            float_offset: 0.0,
            float_phase: factory.scatter() * std::f32::consts::TAU,
            float_speed: 0.002 + factory.scatter() * 0.003,
            spin: 0.0,
            spin_speed: 0.003 + factory.scatter() * 0.02,
            respawn_at_ms: None,
        }
    }

    /// Push pending respawn deadlines back by `ms`
    pub fn shift_clock(&mut self, ms: f64) {
        for prop in &mut self.props {
            if let Some(at) = prop.respawn_at_ms.as_mut() {
                *at += ms;
            }
        }
    }

    pub fn update<F: EntityFactory>(
        &mut self,
        delta_secs: f32,
        now_ms: f64,
        config: &GameConfig,
        factory: &mut F,
    ) {
        let horizon_y = self.kind.horizon_y(config);
        let floor_y = config.player_y - config.cull_margin;

        for prop in &mut self.props {
            prop.y -= step(config.powerup_speed, delta_secs);
            prop.depth = interpolate_depth(
                prop.y,
                horizon_y,
                config.player_y,
                config.perspective_start_depth,
                config.perspective_end_depth,
            );
            if self.kind == EnvironmentKind::CrystalCaverns {
                prop.float_phase += prop.float_speed;
                prop.float_offset = prop.float_phase.cos() * 0.2;
                prop.spin += prop.spin_speed;
            }
        }

        match self.kind {
            EnvironmentKind::Desert => {
                for i in 0..self.props.len() {
                    if self.props[i].y < floor_y {
                        let y = horizon_y + factory.scatter() * 5.0;
                        let prop = self.make_prop(y, config, factory);
                        self.props[i] = prop;
                    }
                }
            }
            EnvironmentKind::CrystalCaverns => {
                for prop in &mut self.props {
                    if prop.y < floor_y && prop.respawn_at_ms.is_none() {
                        prop.respawn_at_ms =
                            Some(now_ms + 5000.0 + f64::from(factory.scatter()) * 5000.0);
                    }
                    if let Some(respawn_at) = prop.respawn_at_ms
                        && now_ms > respawn_at
                    {
                        let side = if factory.scatter() < 0.5 {
                            Lane::Left
                        } else {
                            Lane::Right
                        };
                        prop.y = config.enemy_spawn_y + factory.scatter() * 5.0;
                        prop.x = outside_lane_x(side, config) + (factory.scatter() - 0.5) * 0.5;
                        prop.float_speed = 0.002 + factory.scatter() * 0.003;
                        prop.float_phase = factory.scatter() * std::f32::consts::TAU;
                        prop.spin_speed = 0.01 + factory.scatter() * 0.02;
                        prop.respawn_at_ms = None;
                    }
                }
            }
        }
    }
}

/// Column one unit beyond the outer edge of a lane
fn outside_lane_x(side: Lane, config: &GameConfig) -> f32 {
    config.lane_center(side) + side.sign() * (config.lane_width / 2.0 + 1.0)
}
