//! Dodge Ball - drag the ball, dodge the falling obstacles
//!
//! Core modules:
//! - `sim`: Simulation state, collision tests and the periodic tasks
//! - `engine`: Session controller owning state, scheduler and persistence
//! - `persistence`: Best score storage behind a key-value store
//! - `tuning`: Data-driven game balance
//! - `ui`: Ball drag controller, obstacle glyphs and the screen view model

pub mod engine;
pub mod persistence;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use engine::{GameEngine, Snapshot};
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Width and height of an obstacle's bounding box
    pub const OBSTACLE_SIZE: f32 = 50.0;
    /// Ball radius (bounding box is twice this)
    pub const BALL_RADIUS: f32 = 25.0;

    /// Vertical coordinate where obstacles land and score
    pub const GROUND_POSITION: f32 = 600.0;
    /// Obstacles start above the visible area
    pub const SPAWN_TOP: f32 = -50.0;

    /// Ball start position (top-left)
    pub const BALL_START_X: f32 = 130.0;
    pub const BALL_START_Y: f32 = 600.0;

    /// Drag clamp range for the ball's top-left corner
    pub const BALL_MAX_X: f32 = 300.0;
    pub const BALL_MAX_Y: f32 = 600.0;
    /// Drag deltas at or below this are dropped
    pub const DRAG_THRESHOLD: f32 = 5.0;

    /// Points per level
    pub const LEVEL_UP_THRESHOLD: u32 = 20;

    /// Task periods (milliseconds)
    pub const MOVE_PERIOD_MS: u64 = 50;
    pub const COLLISION_PERIOD_MS: u64 = 20;
    pub const SPAWN_BASE_MS: u64 = 2000;
    pub const SPAWN_STEP_MS: u64 = 200;
    pub const SPAWN_FLOOR_MS: u64 = 500;

    /// Obstacle speed: random(0,1) * (SPEED_BASE + level) + SPEED_BASE
    pub const SPEED_BASE: f32 = 5.0;

    /// Storage key for the best score
    pub const BEST_SCORE_KEY: &str = "bestScore";
}

/// Level for a given score (1-based)
#[inline]
pub fn level_for_score(score: u32, threshold: u32) -> u32 {
    score / threshold.max(1) + 1
}

/// Spawn interval in ms for a level, floored
#[inline]
pub fn spawn_interval_ms(level: u32, base: u64, step: u64, floor: u64) -> u64 {
    base.saturating_sub(u64::from(level) * step).max(floor)
}
