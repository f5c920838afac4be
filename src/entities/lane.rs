/// One of the two vertical tracks. Enemies march down the left lane, power-ups drift down the
/// right one, and the formation roams across both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Lane membership from the sign of a horizontal position; x = 0 belongs to the right lane.
    pub fn of(x: f32) -> Self {
        if x < 0.0 { Lane::Left } else { Lane::Right }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Lane::Left => Lane::Right,
            Lane::Right => Lane::Left,
        }
    }

    /// -1 for the left lane, +1 for the right lane
    pub fn sign(self) -> f32 {
        match self {
            Lane::Left => -1.0,
            Lane::Right => 1.0,
        }
    }
}
