//! Simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (no wall time)
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ball_obstacle_collision, first_collision};
pub use scheduler::{Scheduler, Task};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind};
pub use tick::{check_collisions, move_obstacles, spawn_obstacle};
