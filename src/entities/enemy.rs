use super::lane::Lane;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    /// Heavy zombie: tough, slow and easy to hit
    Fat,
    Crawling,
    Baby,
}

/// Walking pace relative to the base enemy speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    Normal,
    Fast,
    Slow,
}

impl SpeedClass {
    pub fn multiplier(self) -> f32 {
        match self {
            SpeedClass::Normal => 1.0,
            SpeedClass::Fast => 1.2,
            SpeedClass::Slow => 0.8,
        }
    }
}

/// Cosmetic body pose for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Body yaw in radians
    pub sway: f32,
    /// Arm/leg swing in radians around the rest angle
    pub limb_swing: f32,
    /// Head height above the feet
    pub head_height: f32,
}

impl Pose {
    /// Pose at `time_secs` for a zombie with the given phase offset and animation rate
    pub fn at(crawling: bool, time_secs: f32, phase_offset: f32, rate: f32) -> Self {
        let t = (time_secs + phase_offset) * rate;
        Self {
            sway: (t * 2.0).sin() * 0.1,
            limb_swing: (t * 4.0).sin() * 0.2,
            head_height: rest_head_height(crawling) + (t * 3.0).sin() * 0.1,
        }
    }
}

fn rest_head_height(crawling: bool) -> f32 {
    if crawling { 1.5 } else { 2.75 }
}

impl EnemyKind {
    pub fn is_heavy(self) -> bool {
        self == EnemyKind::Fat
    }

    pub fn crawls(self) -> bool {
        self == EnemyKind::Crawling
    }
}

/// Everything the simulation needs to know about a freshly rolled enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBlueprint {
    pub kind: EnemyKind,
    /// Crawls low and fast. Set on every crawler and on the occasional fat zombie.
    pub crawling: bool,
    pub health: u32,
    pub speed: SpeedClass,
    pub collision_radius: f32,
    pub phase_offset: f32,
    pub animation_rate: f32,
}

impl EnemyBlueprint {
    /// Stock stats for a kind, with the given collision radii
    pub fn for_kind(kind: EnemyKind, normal_radius: f32, heavy_radius: f32) -> Self {
        Self::from_traits(
            kind == EnemyKind::Fat,
            kind.crawls(),
            kind == EnemyKind::Baby,
            normal_radius,
            heavy_radius,
        )
    }

    /// Stats for an independently rolled set of traits. Fat decides health and reach,
    /// crawling decides speed and posture, baby only applies to plain zombies.
    pub fn from_traits(
        fat: bool,
        crawling: bool,
        baby: bool,
        normal_radius: f32,
        heavy_radius: f32,
    ) -> Self {
        let kind = match (fat, crawling) {
            (true, _) => EnemyKind::Fat,
            (false, true) => EnemyKind::Crawling,
            (false, false) if baby => EnemyKind::Baby,
            (false, false) => EnemyKind::Normal,
        };
        let health = if fat {
            5
        } else if crawling {
            3
        } else {
            1
        };
        let speed = if crawling {
            SpeedClass::Fast
        } else if fat {
            SpeedClass::Slow
        } else {
            SpeedClass::Normal
        };
        Self {
            kind,
            crawling,
            health,
            speed,
            collision_radius: if fat { heavy_radius } else { normal_radius },
            phase_offset: 0.0,
            animation_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub health: u32,
    pub kind: EnemyKind,
    pub crawling: bool,
    pub speed: SpeedClass,
    pub collision_radius: f32,
    pub phase_offset: f32,
    pub animation_rate: f32,
    pub pose: Pose,
}

impl Enemy {
    pub fn new(id: u32, x: f32, y: f32, depth: f32, blueprint: EnemyBlueprint) -> Self {
        Self {
            id,
            x,
            y,
            depth,
            health: blueprint.health.max(1),
            kind: blueprint.kind,
            crawling: blueprint.crawling,
            speed: blueprint.speed,
            collision_radius: blueprint.collision_radius,
            phase_offset: blueprint.phase_offset,
            animation_rate: blueprint.animation_rate,
            pose: Pose::default(),
        }
    }

    pub fn lane(&self) -> Lane {
        Lane::of(self.x)
    }

    pub fn animate(&mut self, time_secs: f32) {
        self.pose = Pose::at(
            self.crawling,
            time_secs,
            self.phase_offset,
            self.animation_rate,
        );
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn in_reach(&self, y: f32) -> bool {
        (y - self.y).abs() < self.collision_radius
    }
}
