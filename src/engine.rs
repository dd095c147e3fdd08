//! Session controller
//!
//! `GameEngine` is the single owner of the game state. It drives the three
//! periodic tasks through a virtual-clock [`Scheduler`], persists the best
//! score through an injected [`KeyValueStore`], and hands out read-only
//! [`Snapshot`]s for rendering.
//!
//! Tasks due at the same millisecond run spawn, then move, then collision.
//! Game over cancels every task immediately; restart re-arms them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_best_score, save_best_score};
use crate::sim::{
    GameEvent, GamePhase, GameState, Obstacle, Scheduler, Task, check_collisions, move_obstacles,
    spawn_obstacle,
};
use crate::tuning::Tuning;

/// Seed used when tuning doesn't provide one
pub const DEFAULT_SEED: u64 = 0x5eed_ba11;

/// Read-only view of a session for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball: Vec2,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub game_over: bool,
    /// Milliseconds since the session (re)started
    pub elapsed_ms: u64,
    pub obstacles_spawned: u32,
}

/// Owns one game session and its persistence
pub struct GameEngine<S: KeyValueStore> {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    scheduler: Scheduler,
    store: S,
}

impl<S: KeyValueStore> GameEngine<S> {
    /// Start a session, loading the best score from `store`
    pub fn new(tuning: Tuning, store: S) -> Self {
        let seed = tuning.seed.unwrap_or(DEFAULT_SEED);
        let best_score = load_best_score(&store);
        let state = GameState::new(&tuning, best_score);

        let mut engine = Self {
            state,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            store,
        };
        engine.arm_tasks();
        log::info!("Session started (seed {}, best score {})", seed, best_score);
        engine
    }

    fn arm_tasks(&mut self) {
        let spawn_ms = self.tuning.spawn_interval_ms(self.state.level());
        self.scheduler.arm(Task::Spawn, spawn_ms);
        self.scheduler.arm(Task::Move, self.tuning.move_period_ms);
        self.scheduler.arm(Task::Collision, self.tuning.collision_period_ms);
    }

    /// Run one spawn step
    pub fn tick_spawn(&mut self) -> Vec<GameEvent> {
        spawn_obstacle(&mut self.state, &mut self.rng, &self.tuning)
            .into_iter()
            .collect()
    }

    /// Run one move step. A level change re-arms the spawn task with the
    /// new interval.
    pub fn tick_move(&mut self) -> Vec<GameEvent> {
        let events = move_obstacles(&mut self.state, &self.tuning);
        if events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })) {
            let spawn_ms = self.tuning.spawn_interval_ms(self.state.level());
            self.scheduler.arm(Task::Spawn, spawn_ms);
            log::debug!("Spawn interval now {}ms", spawn_ms);
        }
        events
    }

    /// Run one collision step. On a hit the session ends, tasks are
    /// cancelled and the best score is persisted if beaten.
    pub fn tick_collision(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(hit) = check_collisions(&mut self.state, &self.tuning) else {
            return events;
        };
        events.push(hit);
        self.scheduler.cancel_all();

        let score = self.state.score();
        if score > self.state.best_score {
            // In-memory best is kept even if the write fails
            save_best_score(&mut self.store, score);
            self.state.best_score = score;
            events.push(GameEvent::NewBestScore { score });
        }
        events
    }

    /// Advance the virtual clock, firing every task that comes due
    pub fn advance(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        let until = self.scheduler.now_ms() + dt_ms;
        let mut events = Vec::new();

        while let Some(task) = self.scheduler.pop_due(until) {
            self.state.time_ms = self.scheduler.now_ms();
            let step = match task {
                Task::Spawn => self.tick_spawn(),
                Task::Move => self.tick_move(),
                Task::Collision => self.tick_collision(),
            };
            events.extend(step);
        }

        self.scheduler.advance_to(until);
        self.state.time_ms = until;
        events
    }

    /// Start a new session from scratch
    pub fn restart(&mut self) {
        self.state.time_ms = self.scheduler.now_ms();
        self.state.reset(&self.tuning);
        self.arm_tasks();
        log::info!("Session restarted (best score {})", self.state.best_score);
    }

    /// Move the ball (top-left corner)
    pub fn set_ball_position(&mut self, pos: Vec2) {
        self.state.ball = pos;
    }

    pub fn ball_position(&self) -> Vec2 {
        self.state.ball
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.state.obstacles
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Whether a task is currently scheduled
    pub fn is_scheduled(&self, task: Task) -> bool {
        self.scheduler.is_armed(task)
    }

    /// Current scheduling period of a task
    pub fn task_period_ms(&self, task: Task) -> u64 {
        self.scheduler.period_ms(task)
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for scripted scenarios
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: self.state.ball,
            obstacles: self.state.obstacles.clone(),
            score: self.state.score(),
            best_score: self.state.best_score,
            level: self.state.level(),
            game_over: self.state.is_game_over(),
            elapsed_ms: self.state.time_ms - self.state.session_started_ms,
            obstacles_spawned: self.state.obstacles_spawned,
        }
    }
}
