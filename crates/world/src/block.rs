use glam::DVec3;

/// Integer grid cell addressing a block.
///
/// Real positions are floored per component, so every position inside a unit
/// cell addresses the same block. Ordered so block iteration is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey {
    /// Floored x cell coordinate.
    pub x: i32,
    /// Floored y cell coordinate.
    pub y: i32,
    /// Floored z cell coordinate.
    pub z: i32,
}

impl BlockKey {
    /// Discretize a real position into its grid cell.
    pub fn from_position(pos: DVec3) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
            z: pos.z.floor() as i32,
        }
    }
}

/// A placed platform: an axis-aligned cube anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    position: DVec3,
    size: DVec3,
}

impl Block {
    /// Create a block anchored at `position` with the given extent.
    pub fn new(position: DVec3, size: DVec3) -> Self {
        Self { position, size }
    }

    /// Anchor position (minimum corner) as given at creation.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.size
    }

    /// Height of the walkable top surface.
    pub fn top(&self) -> f64 {
        self.position.y + self.size.y
    }

    /// Whether a vertical column at (x, z) passes through this block's footprint.
    pub fn covers_column(&self, x: f64, z: f64) -> bool {
        x >= self.position.x
            && x < self.position.x + self.size.x
            && z >= self.position.z
            && z < self.position.z + self.size.z
    }
}
