//! Data-driven game balance
//!
//! Every number that shapes a session lives here so it can be overridden
//! from a JSON file. Missing fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    /// Screen width (obstacles spawn in [0, width - size))
    pub screen_width: f32,
    /// Screen height
    pub screen_height: f32,
    /// Vertical coordinate where obstacles land
    pub ground_position: f32,
    /// Obstacle bounding box edge
    pub obstacle_size: f32,
    /// Ball bounding box edge
    pub ball_size: f32,
    /// Vertical position of new obstacles (above the visible area)
    pub spawn_top: f32,
    /// Ball position on session start/restart
    pub ball_start: (f32, f32),

    // === Timing ===
    pub spawn_base_ms: u64,
    pub spawn_step_ms: u64,
    pub spawn_floor_ms: u64,
    pub move_period_ms: u64,
    pub collision_period_ms: u64,

    // === Difficulty ===
    /// Points per level
    pub level_up_threshold: u32,
    /// Obstacle speed = random(0,1) * (speed_base + level) + speed_base
    pub speed_base: f32,

    /// Fixed RNG seed for reproducible sessions (None = seed from clock)
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 360.0,
            screen_height: 640.0,
            ground_position: GROUND_POSITION,
            obstacle_size: OBSTACLE_SIZE,
            ball_size: BALL_RADIUS * 2.0,
            spawn_top: SPAWN_TOP,
            ball_start: (BALL_START_X, BALL_START_Y),

            spawn_base_ms: SPAWN_BASE_MS,
            spawn_step_ms: SPAWN_STEP_MS,
            spawn_floor_ms: SPAWN_FLOOR_MS,
            move_period_ms: MOVE_PERIOD_MS,
            collision_period_ms: COLLISION_PERIOD_MS,

            level_up_threshold: LEVEL_UP_THRESHOLD,
            speed_base: SPEED_BASE,

            seed: None,
        }
    }
}

impl Tuning {
    /// Spawn interval for the given level
    pub fn spawn_interval_ms(&self, level: u32) -> u64 {
        crate::spawn_interval_ms(
            level,
            self.spawn_base_ms,
            self.spawn_step_ms,
            self.spawn_floor_ms,
        )
    }

    /// Level reached at the given score
    pub fn level_for_score(&self, score: u32) -> u32 {
        crate::level_for_score(score, self.level_up_threshold)
    }

    /// Parse tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
