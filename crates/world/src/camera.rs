use glam::DVec3;

/// Third-person camera: a position and a look-at target.
///
/// Holds no independent state worth keeping; the session rederives both from
/// the player position after every simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: DVec3,
    target: DVec3,
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn new(position: DVec3, target: DVec3) -> Self {
        Self { position, target }
    }

    /// Current camera position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Current look-at target.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Move the camera.
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// Aim the camera at `target`.
    pub fn look_at(&mut self, target: DVec3) {
        self.target = target;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::ZERO)
    }
}
