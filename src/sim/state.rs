//! Game state and core simulation types
//!
//! Everything a renderer or a test needs to observe a session lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Obstacles falling, tasks scheduled
    Playing,
    /// Ball was hit; waiting for restart
    GameOver,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Bullet,
    Grenade,
    Tank,
    Missile,
    Barrel,
    Shield,
    Cubes,
    Mine,
}

impl ObstacleKind {
    /// Every kind, in spawn-table order
    pub const ALL: [ObstacleKind; 8] = [
        ObstacleKind::Bullet,
        ObstacleKind::Grenade,
        ObstacleKind::Tank,
        ObstacleKind::Missile,
        ObstacleKind::Barrel,
        ObstacleKind::Shield,
        ObstacleKind::Cubes,
        ObstacleKind::Mine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Bullet => "bullet",
            ObstacleKind::Grenade => "grenade",
            ObstacleKind::Tank => "tank",
            ObstacleKind::Missile => "missile",
            ObstacleKind::Barrel => "barrel",
            ObstacleKind::Shield => "shield",
            ObstacleKind::Cubes => "cubes",
            ObstacleKind::Mine => "mine",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner (left, top)
    pub pos: Vec2,
    pub kind: ObstacleKind,
    /// Vertical distance per move tick
    pub speed: f32,
    /// Session clock at creation
    pub spawned_at_ms: u64,
}

impl Obstacle {
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Something that happened during a task step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New obstacle entered the field
    Spawned { id: u32, kind: ObstacleKind },
    /// Obstacle reached the ground and scored
    Landed { id: u32 },
    /// Score crossed a level threshold
    LevelUp { level: u32 },
    /// Ball overlapped an obstacle; session over
    Collision { id: u32 },
    /// Final score beat the stored best
    NewBestScore { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Ball top-left position
    pub ball: Vec2,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    score: u32,
    /// Highest score ever reached at game over (persisted)
    pub best_score: u32,
    /// Derived from score; only `add_score` and `reset` write it
    level: u32,
    pub phase: GamePhase,
    /// Scheduler clock at the last task step
    pub time_ms: u64,
    /// Clock when the current session started
    pub session_started_ms: u64,
    /// Obstacles spawned this session
    pub obstacles_spawned: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session with the given stored best score
    pub fn new(tuning: &Tuning, best_score: u32) -> Self {
        Self {
            ball: Vec2::from(tuning.ball_start),
            obstacles: Vec::new(),
            score: 0,
            best_score,
            level: 1,
            phase: GamePhase::Playing,
            time_ms: 0,
            session_started_ms: 0,
            obstacles_spawned: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add points and recompute the level. Returns the new level if it changed.
    pub fn add_score(&mut self, points: u32, tuning: &Tuning) -> Option<u32> {
        self.score = self.score.saturating_add(points);
        let level = tuning.level_for_score(self.score);
        if level != self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }

    /// Jump straight to a score, keeping the level consistent
    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32, tuning: &Tuning) {
        self.score = score;
        self.level = tuning.level_for_score(score);
    }

    /// Back to a fresh Playing session; best score and ID counter survive
    pub fn reset(&mut self, tuning: &Tuning) {
        self.ball = Vec2::from(tuning.ball_start);
        self.obstacles.clear();
        self.score = 0;
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.session_started_ms = self.time_ms;
        self.obstacles_spawned = 0;
    }
}
