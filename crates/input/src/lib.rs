#![warn(missing_docs)]
//! Key-state input handling for the live-key movement mode.

use glam::DVec3;
use std::collections::HashSet;

/// Pressed-key tracking and movement-intent derivation.
///
/// The live-key mode and the text command path both express movement as an
/// intent vector whose magnitude never exceeds one, so the player step logic
/// is agnostic about where the intent came from.
#[derive(Debug, Default)]
pub struct InputState {
    keys_pressed: HashSet<char>,
}

impl InputState {
    /// Create a new input state with no keys pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent assignment of one key's pressed state (case-insensitive).
    pub fn set_key(&mut self, key: char, pressed: bool) {
        let key = key.to_ascii_lowercase();
        if pressed {
            self.keys_pressed.insert(key);
        } else {
            self.keys_pressed.remove(&key);
        }
    }

    /// Whether `key` is currently pressed (case-insensitive).
    pub fn is_key_pressed(&self, key: char) -> bool {
        self.keys_pressed.contains(&key.to_ascii_lowercase())
    }

    /// Combined movement intent from the currently pressed `w/a/s/d` keys.
    ///
    /// Contributions are summed, then renormalized only when the combined
    /// magnitude exceeds one: diagonal movement is never faster than cardinal.
    pub fn movement_intent(&self) -> DVec3 {
        let mut intent = DVec3::ZERO;
        if self.is_key_pressed('w') {
            intent.z += 1.0;
        }
        if self.is_key_pressed('s') {
            intent.z -= 1.0;
        }
        if self.is_key_pressed('a') {
            intent.x -= 1.0;
        }
        if self.is_key_pressed('d') {
            intent.x += 1.0;
        }
        if intent.length() > 1.0 {
            intent = intent.normalize();
        }
        intent
    }
}
