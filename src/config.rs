use anyhow::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/sandvox.toml";

/// Simulation tunables: world shape, spawn point, movement constants, and the
/// trailing-camera offsets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    /// Minimum world corner.
    pub bounds_min: [f64; 3],
    /// Maximum world corner.
    pub bounds_max: [f64; 3],
    /// Ground plane height.
    pub ground_height: f64,
    /// Player spawn point.
    pub spawn: [f64; 3],
    /// Horizontal movement speed (units/second).
    pub move_speed: f64,
    /// Upward velocity granted by a jump (units/second).
    pub jump_speed: f64,
    /// Downward acceleration (units/second²).
    pub gravity: f64,
    /// Maximum fall speed (units/second).
    pub terminal_velocity: f64,
    /// Camera offset from the player while trailing.
    pub camera_offset: [f64; 3],
    /// Look-at offset from the player while trailing.
    pub camera_look_offset: [f64; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bounds_min: [-50.0, -5.0, -50.0],
            bounds_max: [50.0, 50.0, 50.0],
            ground_height: 0.0,
            spawn: [0.0, 2.0, 0.0],
            move_speed: 5.0,
            jump_speed: 8.0,
            gravity: 20.0,
            terminal_velocity: 50.0,
            camera_offset: [0.0, 8.0, -12.0],
            camera_look_offset: [0.0, 1.0, 0.0],
        }
    }
}

impl SimConfig {
    /// Load the simulation config from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SimConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Simulation config not found at {}. Using defaults",
                        path.display()
                    );
                }
                SimConfig::default()
            }
        }
    }

    /// Save the config to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Minimum world corner as a vector.
    pub fn bounds_min(&self) -> DVec3 {
        DVec3::from_array(self.bounds_min)
    }

    /// Maximum world corner as a vector.
    pub fn bounds_max(&self) -> DVec3 {
        DVec3::from_array(self.bounds_max)
    }

    /// Spawn point as a vector.
    pub fn spawn_point(&self) -> DVec3 {
        DVec3::from_array(self.spawn)
    }

    /// Trailing camera offset as a vector.
    pub fn camera_offset(&self) -> DVec3 {
        DVec3::from_array(self.camera_offset)
    }

    /// Trailing look-at offset as a vector.
    pub fn camera_look_offset(&self) -> DVec3 {
        DVec3::from_array(self.camera_look_offset)
    }
}
