use glam::DVec3;

/// Axis-aligned box bounding the playable world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Minimum corner (x, y, z).
    pub min: DVec3,
    /// Maximum corner (x, y, z).
    pub max: DVec3,
}

impl WorldBounds {
    /// Create bounds ensuring min <= max per axis.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Whether `pos` lies inside the box (inclusive on both corners).
    pub fn contains(&self, pos: DVec3) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    /// Clamp the horizontal components of `pos` into the box.
    ///
    /// Vertical position is left untouched; falling and jumping are resolved
    /// against the ground and block tops, not the box.
    pub fn clamp_horizontal(&self, pos: DVec3) -> DVec3 {
        DVec3::new(
            pos.x.clamp(self.min.x, self.max.x),
            pos.y,
            pos.z.clamp(self.min.z, self.max.z),
        )
    }
}
