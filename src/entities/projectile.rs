use super::lane::Lane;

/// A shot fired by one of the player's units. Flies straight up; its column never changes.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Height the projectile was fired from
    pub origin_y: f32,
    /// Depth at the moment of firing
    pub origin_depth: f32,
    pub depth: f32,
}

impl Projectile {
    pub fn new(id: u32, x: f32, y: f32, depth: f32) -> Self {
        Self {
            id,
            x,
            y,
            origin_y: y,
            origin_depth: depth,
            depth,
        }
    }

    pub fn lane(&self) -> Lane {
        Lane::of(self.x)
    }

    pub fn is_out_of_bounds(&self, ceiling_y: f32) -> bool {
        self.y > ceiling_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_new() {
        let projectile = Projectile::new(7, -1.6, -7.7, 3.0);
        assert_eq!(projectile.id, 7);
        assert_eq!(projectile.origin_y, -7.7);
        assert_eq!(projectile.origin_depth, 3.0);
        assert_eq!(projectile.depth, 3.0);
        assert_eq!(projectile.lane(), Lane::Left);
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        let mut projectile = Projectile::new(1, 1.0, 29.0, 0.0);
        assert!(!projectile.is_out_of_bounds(30.0));
        projectile.y = 30.0;
        assert!(!projectile.is_out_of_bounds(30.0));
        projectile.y = 30.01;
        assert!(projectile.is_out_of_bounds(30.0));
    }
}
