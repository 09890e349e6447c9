//! Data-driven game balance
//!
//! The numbers that decide how the game feels. A JSON file named by the
//! `PLUME_TUNING` environment variable overrides any subset of the
//! defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs consumed by the simulation each tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-tick downward acceleration
    pub gravity: f32,
    /// Velocity override applied on flap (negative = up)
    pub flap_impulse: f32,
    /// Leftward pipe translation per tick
    pub pipe_speed: f32,
    /// Ticks between pipe spawns
    pub pipe_interval: u32,
    /// Vertical opening between pipe halves
    pub base_gap: f32,
    /// Uniform jitter applied to the gap, +/-
    pub gap_jitter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            pipe_speed: PIPE_SPEED,
            pipe_interval: PIPE_INTERVAL,
            base_gap: BASE_GAP,
            gap_jitter: GAP_JITTER,
        }
    }
}

impl Tuning {
    /// Environment variable naming an override file
    const ENV_KEY: &'static str = "PLUME_TUNING";

    /// Load overrides from the file named by `PLUME_TUNING`. Any failure
    /// logs a warning and falls back to defaults; tuning is never fatal.
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_KEY) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {path}");
                    tuning
                }
                Err(e) => {
                    log::warn!("ignoring malformed tuning file {path}: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("cannot read tuning file {path}: {e}");
                Self::default()
            }
        }
    }
}
