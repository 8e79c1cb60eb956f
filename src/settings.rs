//! Lane settings
//!
//! Tunables live in a JSON file; anything missing falls back to the
//! defaults below. Domain rules (pin count, settle time, meter zones) are
//! constants in [`crate::consts`] and are not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "BOWLING_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball spin (rad/s) per millisecond of meter charge
    pub spin_per_ms: f32,
    /// Downward gravity (m/s²)
    pub gravity: f32,

    // === Camera ===
    /// Radians per turn command
    pub turn_speed: f32,
    /// Lane units per move command
    pub move_speed: f32,
    /// Radians per pixel of mouse look
    pub look_sensitivity: f32,

    // === Demo auto-bowler ===
    /// Frames to bowl before stopping
    pub demo_frames: u32,
    /// RNG seed for hold durations
    pub demo_seed: u64,
    /// Seconds to wait after launch before rerack if nothing fell
    pub auto_reset_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_per_ms: 0.05,
            gravity: crate::consts::GRAVITY,

            turn_speed: 0.1,
            move_speed: 0.1,
            look_sensitivity: 0.003,

            demo_frames: 10,
            demo_seed: 12345,
            auto_reset_secs: 8.0,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Settings from `$BOWLING_SETTINGS`, or defaults if unset or unreadable
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
