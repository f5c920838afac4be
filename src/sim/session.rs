//! The simulation driver. A `Session` owns one game from start to end screen; the host calls
//! [`Session::tick`] once per frame with its wall clock.

use color_eyre::eyre::Result;
use log::info;

use super::events::{GameEvent, Outcome};
use super::world::{World, pointer_target};
use super::{collision, motion, spawner};
use crate::config::GameConfig;
use crate::entities::{
    Enemy, Environment, EntityFactory, Formation, GamePhase, GameState, PowerUp, Projectile,
    RandomFactory,
};

/// Wall-clock anchors, all in host milliseconds. `None` means "never happened".
#[derive(Debug, Clone, Default)]
struct Timers {
    started_ms: f64,
    last_frame_ms: Option<f64>,
    last_enemy_spawn_ms: Option<f64>,
    last_powerup_spawn_ms: Option<f64>,
    last_volley_ms: Option<f64>,
    paused_at_ms: Option<f64>,
}

impl Timers {
    fn shift(&mut self, ms: f64) {
        self.started_ms += ms;
        for anchor in [
            &mut self.last_frame_ms,
            &mut self.last_enemy_spawn_ms,
            &mut self.last_powerup_spawn_ms,
            &mut self.last_volley_ms,
        ] {
            if let Some(t) = anchor.as_mut() {
                *t += ms;
            }
        }
    }
}

/// Snapshot of one frame for the presentation layer
pub struct FrameView<'a> {
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub powerups: &'a [PowerUp],
    pub formation: &'a Formation,
    pub environment: &'a Environment,
    pub state: &'a GameState,
    pub target_x: f32,
    pub elapsed_ms: f64,
}

pub struct Session<F: EntityFactory = RandomFactory> {
    config: GameConfig,
    factory: F,
    world: World,
    environment: Environment,
    timers: Timers,
    last_now_ms: f64,
}

impl<F: EntityFactory> Session<F> {
    /// Validates `config` and starts a session at host time `now_ms`, spawning the opening
    /// wave
    pub fn start(config: GameConfig, mut factory: F, now_ms: f64) -> Result<Self> {
        config.validate()?;
        let world = World::new(&config);
        let environment = Environment::new(factory.environment(), &config, &mut factory);
        let mut session = Self {
            config,
            factory,
            world,
            environment,
            timers: Timers::default(),
            last_now_ms: now_ms,
        };
        session.begin(now_ms);
        Ok(session)
    }

    /// Throws the current game away and starts a fresh one in place
    pub fn restart(&mut self, now_ms: f64) {
        self.world = World::new(&self.config);
        let kind = self.factory.environment();
        self.environment = Environment::new(kind, &self.config, &mut self.factory);
        self.timers = Timers::default();
        self.begin(now_ms);
    }

    fn begin(&mut self, now_ms: f64) {
        self.timers.started_ms = now_ms;
        self.last_now_ms = now_ms;
        info!(
            "Session started in the {}, {} waves to survive",
            self.environment.kind.get_name(),
            self.config.required_waves
        );
        spawner::spawn_wave(&mut self.world, &self.config, &mut self.factory);
        self.timers.last_enemy_spawn_ms = Some(now_ms);
    }

    /// Advance the game to host time `now_ms` with the pointer at `pointer` (0 = left lane
    /// center, 1 = right lane center). Does nothing unless the session is running.
    pub fn tick(&mut self, now_ms: f64, pointer: f32) -> GamePhase {
        if !self.world.state.is_running() {
            return self.world.state.phase;
        }
        self.last_now_ms = now_ms;

        let delta_secs = match self.timers.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.timers.last_frame_ms = Some(now_ms);

        let config = &self.config;
        let world = &mut self.world;

        if spawner::is_due(
            self.timers.last_enemy_spawn_ms,
            now_ms,
            config.enemy_spawn_interval_ms,
        ) {
            spawner::spawn_wave(world, config, &mut self.factory);
            self.timers.last_enemy_spawn_ms = Some(now_ms);
        }
        if spawner::is_due(
            self.timers.last_powerup_spawn_ms,
            now_ms,
            config.powerup_spawn_interval_ms,
        ) {
            spawner::spawn_powerup(world, config, &mut self.factory);
            self.timers.last_powerup_spawn_ms = Some(now_ms);
        }

        let elapsed_secs = ((now_ms - self.timers.started_ms) / 1000.0) as f32;
        for enemy in &mut world.enemies {
            enemy.animate(elapsed_secs);
        }

        world.target_x = pointer_target(pointer, config);
        world
            .formation
            .ease_toward(world.target_x, config.player_move_speed, delta_secs);

        motion::advance_enemies(&mut world.enemies, config, delta_secs);
        motion::advance_powerups(&mut world.powerups, config, delta_secs);
        motion::advance_projectiles(&mut world.projectiles, config, delta_secs);

        if collision::resolve_contacts(world, config) {
            self.finish(Outcome::GameOver);
            return self.world.state.phase;
        }
        collision::resolve_projectiles(world, config);

        if spawner::is_due(
            self.timers.last_volley_ms,
            now_ms,
            world.state.fire_interval_ms,
        ) {
            spawner::fire_volley(world, config);
            self.timers.last_volley_ms = Some(now_ms);
        }

        if world.state.live_enemies == 0 && world.state.waves_spawned >= config.required_waves {
            self.finish(Outcome::Victory);
            return self.world.state.phase;
        }

        self.environment
            .update(delta_secs, now_ms, &self.config, &mut self.factory);
        self.world.state.phase
    }

    fn finish(&mut self, outcome: Outcome) {
        self.world.state.phase = match outcome {
            Outcome::GameOver => GamePhase::GameOver,
            Outcome::Victory => GamePhase::Victory,
        };
        info!(
            "{} after {} waves with {} units",
            outcome.message(),
            self.world.state.waves_spawned,
            self.world.state.player_units
        );
        self.world.events.push(GameEvent::Ended(outcome));
    }

    /// Freeze the game. Ignored unless running.
    pub fn pause(&mut self, now_ms: f64) {
        if self.world.state.is_running() {
            self.world.state.phase = GamePhase::Paused;
            self.timers.paused_at_ms = Some(now_ms);
            info!("Paused");
        }
    }

    /// Unfreeze the game. Time spent paused does not count toward any spawn or volley timer.
    pub fn resume(&mut self, now_ms: f64) {
        if self.world.state.phase != GamePhase::Paused {
            return;
        }
        if let Some(paused_at) = self.timers.paused_at_ms.take() {
            let paused_for = (now_ms - paused_at).max(0.0);
            self.timers.shift(paused_for);
            self.environment.shift_clock(paused_for);
        }
        self.world.state.phase = GamePhase::Running;
        info!("Resumed");
    }

    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.world.state.phase {
            GamePhase::Running => self.pause(now_ms),
            GamePhase::Paused => self.resume(now_ms),
            GamePhase::GameOver | GamePhase::Victory => {}
        }
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            enemies: &self.world.enemies,
            projectiles: &self.world.projectiles,
            powerups: &self.world.powerups,
            formation: &self.world.formation,
            environment: &self.environment,
            state: &self.world.state,
            target_x: self.world.target_x,
            elapsed_ms: self.last_now_ms - self.timers.started_ms,
        }
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.events)
    }

    pub fn state(&self) -> &GameState {
        &self.world.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for scripted scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
