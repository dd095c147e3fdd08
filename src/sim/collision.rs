//! Collision detection
//!
//! Both the ball and the obstacles are treated as axis-aligned boxes anchored
//! at their top-left corner. Touching edges do not count as overlap.

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a square edge length
    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Check whether the ball box overlaps an obstacle box
pub fn ball_obstacle_collision(
    ball_pos: Vec2,
    ball_size: f32,
    obstacle: &Obstacle,
    obstacle_size: f32,
) -> bool {
    Aabb::square(ball_pos, ball_size).overlaps(&Aabb::square(obstacle.pos, obstacle_size))
}

/// First obstacle (in iteration order) the ball overlaps
pub fn first_collision<'a>(
    ball_pos: Vec2,
    ball_size: f32,
    obstacles: &'a [Obstacle],
    obstacle_size: f32,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| ball_obstacle_collision(ball_pos, ball_size, o, obstacle_size))
}
