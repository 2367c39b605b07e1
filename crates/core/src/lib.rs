#![warn(missing_docs)]
//! Core primitives shared across the workspace.

use glam::DVec3;

/// Simulated seconds advanced by one movement command (10 steps per second).
pub const FIXED_STEP_SECONDS: f64 = 0.1;

/// Deterministic game clock counting completed fixed steps.
///
/// Time is derived from the step count rather than accumulated floats, so two
/// sessions that process the same commands always report the same elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameClock {
    steps: u64,
}

impl GameClock {
    /// Clock at the start of a session.
    pub const ZERO: Self = Self { steps: 0 };

    /// Advance by one fixed step.
    pub fn advance(&mut self) {
        self.steps += 1;
    }

    /// Completed fixed steps since the session started.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Elapsed simulated time in seconds.
    pub fn seconds(&self) -> f64 {
        self.steps as f64 * FIXED_STEP_SECONDS
    }

    /// Elapsed simulated time truncated to whole seconds (status report format).
    pub fn whole_seconds(&self) -> u64 {
        self.seconds() as u64
    }
}

/// Format a vector the way command responses print positions: `(x, y, z)`.
///
/// Uses the shortest round-trip float display, so whole values print without
/// a fractional part (`(5, 0, 5)`, not `(5.000000, ...)`).
pub fn format_vec3(v: DVec3) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}
