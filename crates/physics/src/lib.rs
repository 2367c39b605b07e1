#![warn(missing_docs)]
//! Player physics: gravity, support collision, and fixed-step integration.

use glam::DVec3;
use sandvox_world::World;

/// Movement tunables applied each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    /// Horizontal speed while an input direction is pending (units/second).
    pub move_speed: f64,
    /// Upward velocity granted by a jump (units/second).
    pub jump_speed: f64,
    /// Downward acceleration (units/second²).
    pub gravity: f64,
    /// Maximum fall speed (units/second).
    pub terminal_velocity: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_speed: 8.0,
            gravity: 20.0,
            terminal_velocity: 50.0,
        }
    }
}

/// The player entity: position, velocity, grounded flag, pending input.
///
/// Owned exclusively by the game session; everything here is read through
/// snapshot accessors and mutated only inside a simulation step (plus the
/// two explicit intents, [`Player::jump`] and [`Player::set_input_direction`]).
#[derive(Debug, Clone)]
pub struct Player {
    position: DVec3,
    velocity: DVec3,
    on_ground: bool,
    input_direction: DVec3,
    tuning: PlayerTuning,
}

impl Player {
    /// Spawn a standing player at `spawn`.
    pub fn new(spawn: DVec3, tuning: PlayerTuning) -> Self {
        Self {
            position: spawn,
            velocity: DVec3::ZERO,
            on_ground: true,
            input_direction: DVec3::ZERO,
            tuning,
        }
    }

    /// Current position snapshot.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Current velocity snapshot.
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Whether the player rests on the ground plane or a block top.
    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    /// Queue a movement intent consumed by the next step. Only the horizontal
    /// components matter; vertical motion comes from gravity and jumping.
    pub fn set_input_direction(&mut self, direction: DVec3) {
        self.input_direction = direction;
    }

    /// Launch upward. Airborne jumps are silently ignored: being grounded is
    /// the precondition, enforced here rather than by callers.
    pub fn jump(&mut self) {
        if self.on_ground {
            self.velocity.y = self.tuning.jump_speed;
            self.on_ground = false;
        }
    }

    /// Advance one step of `dt` seconds against `world`.
    ///
    /// Applies the pending intent as horizontal velocity, gravity (with a
    /// terminal-velocity clamp) as vertical, integrates, clamps horizontally
    /// to the world bounds, then snaps onto the supporting surface when the
    /// step crossed it. The pending intent is consumed.
    pub fn update(&mut self, dt: f64, world: &World) {
        let prev_y = self.position.y;

        self.velocity.x = self.input_direction.x * self.tuning.move_speed;
        self.velocity.z = self.input_direction.z * self.tuning.move_speed;
        self.velocity.y =
            (self.velocity.y - self.tuning.gravity * dt).max(-self.tuning.terminal_velocity);

        self.position += self.velocity * dt;
        self.position = world.bounds().clamp_horizontal(self.position);

        match world.support_height(self.position.x, self.position.z, prev_y) {
            Some(support) if self.position.y <= support => {
                self.position.y = support;
                self.velocity.y = 0.0;
                self.on_ground = true;
            }
            _ => self.on_ground = false,
        }

        self.input_direction = DVec3::ZERO;
    }
}
