use super::lane::Lane;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Halves the volley interval
    FireRate,
    /// Adds a unit to the formation
    UnitGain,
}

impl PowerUpKind {
    pub fn get_name(&self) -> &'static str {
        match self {
            PowerUpKind::FireRate => "Rapid Fire",
            PowerUpKind::UnitGain => "Reinforcement",
        }
    }
}

/// A crate drifting down the power-up lane. Shoot it `hits_remaining` times to collect it.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub kind: PowerUpKind,
    hits_remaining: u32,
    label: String,
}

impl PowerUp {
    pub fn new(id: u32, x: f32, y: f32, depth: f32, kind: PowerUpKind, hits: u32) -> Self {
        let hits = hits.max(1);
        Self {
            id,
            x,
            y,
            depth,
            kind,
            hits_remaining: hits,
            label: hits.to_string(),
        }
    }

    pub fn lane(&self) -> Lane {
        Lane::of(self.x)
    }

    pub fn hits_remaining(&self) -> u32 {
        self.hits_remaining
    }

    /// Number painted on the crate
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Registers one hit; returns true once the crate is exhausted
    pub fn take_hit(&mut self) -> bool {
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        self.label = self.hits_remaining.to_string();
        self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        self.hits_remaining == 0
    }

    pub fn in_reach(&self, y: f32, range: f32) -> bool {
        (y - self.y).abs() < range
    }

    pub fn is_out_of_bounds(&self, min_y: f32) -> bool {
        self.y < min_y
    }
}
