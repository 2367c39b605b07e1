//! World state: ground plane, placed blocks, bounds, and the trailing camera.

use std::collections::BTreeMap;

use glam::DVec3;
use sandvox_core::format_vec3;
use tracing::debug;

use crate::{Block, BlockKey, Camera, WorldBounds};

/// Tolerance when deciding whether a surface can support the player.
const SUPPORT_EPS: f64 = 1e-9;

/// The bounded sandbox world.
#[derive(Debug, Clone)]
pub struct World {
    bounds: WorldBounds,
    ground_height: Option<f64>,
    blocks: BTreeMap<BlockKey, Block>,
    camera: Camera,
    age_seconds: f64,
}

impl World {
    /// Create an empty world with the given bounds and no ground plane.
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            bounds,
            ground_height: None,
            blocks: BTreeMap::new(),
            camera: Camera::default(),
            age_seconds: 0.0,
        }
    }

    /// World bounds.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Install the ground plane at `height`.
    pub fn create_ground(&mut self, height: f64) {
        self.ground_height = Some(height);
    }

    /// Ground plane height, if one has been created.
    pub fn ground_height(&self) -> Option<f64> {
        self.ground_height
    }

    /// Place a platform anchored at `position`. A platform already occupying
    /// the same grid cell is replaced.
    pub fn create_platform(&mut self, position: DVec3, size: DVec3) {
        let key = BlockKey::from_position(position);
        if self.blocks.insert(key, Block::new(position, size)).is_some() {
            debug!(?key, "replaced platform in occupied cell");
        } else {
            debug!(?key, "placed platform");
        }
    }

    /// Remove the platform whose grid cell contains `position`. Returns
    /// whether a platform was there.
    pub fn destroy_platform(&mut self, position: DVec3) -> bool {
        let key = BlockKey::from_position(position);
        let removed = self.blocks.remove(&key).is_some();
        if removed {
            debug!(?key, "destroyed platform");
        }
        removed
    }

    /// Number of placed blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Placed blocks in deterministic (grid cell) order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Mutable access to the trailing camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The trailing camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Highest surface at or below `below` that the column at (x, z) rests on:
    /// the ground plane or a block top. `None` when nothing is underneath.
    pub fn support_height(&self, x: f64, z: f64, below: f64) -> Option<f64> {
        let limit = below + SUPPORT_EPS;
        let mut support = self.ground_height.filter(|ground| *ground <= limit);
        for block in self.blocks.values() {
            if !block.covers_column(x, z) {
                continue;
            }
            let top = block.top();
            if top <= limit && support.map_or(true, |s| top > s) {
                support = Some(top);
            }
        }
        support
    }

    /// Advance the world by one step of simulated time.
    pub fn update(&mut self, dt: f64) {
        self.age_seconds += dt;
    }

    /// Seconds of simulated time this world has been stepped.
    pub fn age_seconds(&self) -> f64 {
        self.age_seconds
    }

    /// Textual rendering of the world state, one line per entry.
    pub fn draw(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "Camera at {} looking at {}",
            format_vec3(self.camera.position()),
            format_vec3(self.camera.target())
        ));
        match self.ground_height {
            Some(height) => lines.push(format!("Ground plane at y = {height}")),
            None => lines.push("No ground plane".to_string()),
        }
        lines.push(format!(
            "Bounds: {} to {}",
            format_vec3(self.bounds.min),
            format_vec3(self.bounds.max)
        ));
        lines.push(format!("Blocks placed: {}", self.blocks.len()));
        for block in self.blocks.values() {
            lines.push(format!("  Block at {}", format_vec3(block.position())));
        }
        lines.push(format!("World age: {:.1}s", self.age_seconds));
        lines
    }
}
