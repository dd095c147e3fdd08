//! Drag-to-move ball control

use glam::Vec2;

use crate::consts::{BALL_MAX_X, BALL_MAX_Y, BALL_RADIUS, DRAG_THRESHOLD};

/// Converts drag coordinates to ball positions and drops jitter
#[derive(Debug, Clone)]
pub struct BallController {
    /// Last position handed out
    last: Vec2,
    radius: f32,
    max: Vec2,
    threshold: f32,
}

impl BallController {
    /// Controller anchored at the ball's current position
    pub fn new(start: Vec2) -> Self {
        Self {
            last: start,
            radius: BALL_RADIUS,
            max: Vec2::new(BALL_MAX_X, BALL_MAX_Y),
            threshold: DRAG_THRESHOLD,
        }
    }

    /// Candidate top-left for a finger at (x, y)
    pub fn target(&self, x: f32, y: f32) -> Vec2 {
        (Vec2::new(x, y) - Vec2::splat(self.radius)).clamp(Vec2::ZERO, self.max)
    }

    /// Feed a drag sample. Returns a new ball position when it moved more
    /// than the threshold on either axis.
    pub fn on_drag(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let next = self.target(x, y);
        let delta = (next - self.last).abs();
        if delta.x > self.threshold || delta.y > self.threshold {
            self.last = next;
            Some(next)
        } else {
            None
        }
    }

    /// Re-anchor after the ball was moved elsewhere (restart)
    pub fn reset(&mut self, pos: Vec2) {
        self.last = pos;
    }

    pub fn last(&self) -> Vec2 {
        self.last
    }
}
