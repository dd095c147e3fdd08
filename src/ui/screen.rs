//! Game screen view model
//!
//! Composes the engine and the ball controller for one viewport. Input comes
//! in as drag samples and button presses; output is a [`ScreenView`] that a
//! renderer draws as-is.

use glam::Vec2;
use serde::Serialize;

use super::ball_controller::BallController;
use super::obstacle_glyph::{Glyph, glyph_for_kind};
use crate::engine::GameEngine;
use crate::persistence::KeyValueStore;
use crate::sim::GameEvent;

/// Ball radius as a fraction of screen width, used for edge clamping
pub const BALL_RADIUS_FRACTION: f32 = 0.033;
/// Ground strip height as a fraction of screen height
pub const GROUND_HEIGHT_FRACTION: f32 = 0.08;

/// Screen dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Edge margin for the ball
    pub fn ball_margin(&self) -> f32 {
        self.width * BALL_RADIUS_FRACTION
    }

    /// Keep the ball inside the screen
    pub fn clamp_ball(&self, pos: Vec2) -> Vec2 {
        let r = self.ball_margin();
        Vec2::new(
            pos.x.max(r).min(self.width - r),
            pos.y.max(r).min(self.height - r),
        )
    }

    pub fn ground_height(&self) -> f32 {
        self.height * GROUND_HEIGHT_FRACTION
    }
}

/// Top row counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
}

/// One obstacle ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub left: f32,
    pub top: f32,
    pub glyph: Glyph,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScreenView {
    Playing {
        ball: Vec2,
        hud: Hud,
        obstacles: Vec<ObstacleView>,
        /// Ground strip: top edge and height
        ground_top: f32,
        ground_height: f32,
    },
    GameOver {
        score: u32,
        best_score: u32,
    },
}

/// A playable screen: engine + touch handling + view model
pub struct GameScreen<S: KeyValueStore> {
    engine: GameEngine<S>,
    controller: BallController,
    viewport: Viewport,
}

impl<S: KeyValueStore> GameScreen<S> {
    pub fn new(engine: GameEngine<S>, viewport: Viewport) -> Self {
        let controller = BallController::new(engine.ball_position());
        Self {
            engine,
            controller,
            viewport,
        }
    }

    /// Handle a drag sample in screen coordinates
    pub fn on_drag(&mut self, x: f32, y: f32) {
        if let Some(pos) = self.controller.on_drag(x, y) {
            self.engine.set_ball_position(self.viewport.clamp_ball(pos));
        }
    }

    /// Restart button
    pub fn press_restart(&mut self) {
        self.engine.restart();
        self.controller.reset(self.engine.ball_position());
    }

    /// Let time pass
    pub fn advance(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        self.engine.advance(dt_ms)
    }

    pub fn engine(&self) -> &GameEngine<S> {
        &self.engine
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Build the current frame
    pub fn view(&self) -> ScreenView {
        let engine = &self.engine;
        if engine.is_game_over() {
            return ScreenView::GameOver {
                score: engine.score(),
                best_score: engine.best_score(),
            };
        }

        let obstacles = engine
            .obstacles()
            .iter()
            .filter_map(|o| {
                glyph_for_kind(o.kind).map(|glyph| ObstacleView {
                    id: o.id,
                    left: o.left(),
                    top: o.top(),
                    glyph,
                })
            })
            .collect();

        let ground_height = self.viewport.ground_height();
        ScreenView::Playing {
            ball: engine.ball_position(),
            hud: Hud {
                score: engine.score(),
                best_score: engine.best_score(),
                level: engine.level(),
            },
            obstacles,
            ground_top: self.viewport.height - ground_height,
            ground_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{Obstacle, ObstacleKind};
    use crate::tuning::Tuning;

    fn screen() -> GameScreen<MemoryStore> {
        let tuning = Tuning {
            seed: Some(42),
            ..Default::default()
        };
        GameScreen::new(
            GameEngine::new(tuning, MemoryStore::new()),
            Viewport::new(360.0, 640.0),
        )
    }

    #[test]
    fn test_clamp_ball_to_viewport() {
        let viewport = Viewport::new(100.0, 200.0);
        let r = viewport.ball_margin();
        assert_eq!(viewport.clamp_ball(Vec2::new(0.0, 0.0)), Vec2::new(r, r));
        assert_eq!(
            viewport.clamp_ball(Vec2::new(500.0, 500.0)),
            Vec2::new(100.0 - r, 200.0 - r)
        );
        assert_eq!(viewport.clamp_ball(Vec2::new(50.0, 60.0)), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_drag_moves_ball() {
        let mut screen = screen();
        screen.on_drag(125.0, 225.0);
        assert_eq!(screen.engine().ball_position(), Vec2::new(100.0, 200.0));
        // Controller clamps to 0 first, then the screen margin applies
        screen.on_drag(0.0, 0.0);
        let r = screen.viewport().ball_margin();
        assert_eq!(screen.engine().ball_position(), Vec2::new(r, r));
    }

    #[test]
    fn test_playing_view() {
        let screen = screen();
        match screen.view() {
            ScreenView::Playing {
                ball,
                hud,
                obstacles,
                ground_top,
                ground_height,
            } => {
                assert_eq!(ball, Vec2::new(130.0, 600.0));
                assert_eq!(
                    hud,
                    Hud {
                        score: 0,
                        best_score: 0,
                        level: 1
                    }
                );
                assert!(obstacles.is_empty());
                assert!((ground_height - 51.2).abs() < 1e-3);
                assert!((ground_top - 588.8).abs() < 1e-3);
            }
            other => panic!("expected Playing, got {:?}", other),
        }
    }

    #[test]
    fn test_game_over_view_and_restart() {
        let mut screen = screen();
        screen.on_drag(125.0, 125.0);
        {
            let state = screen.engine.state_mut();
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle {
                id,
                pos: Vec2::new(100.0, 100.0),
                kind: ObstacleKind::Grenade,
                speed: 0.0,
                spawned_at_ms: 0,
            });
            state.set_score(7, &Tuning::default());
        }
        screen.advance(20);

        assert_eq!(
            screen.view(),
            ScreenView::GameOver {
                score: 7,
                best_score: 7
            }
        );

        screen.press_restart();
        assert!(matches!(screen.view(), ScreenView::Playing { .. }));
        assert_eq!(screen.engine().ball_position(), Vec2::new(130.0, 600.0));
        // Throttle re-anchored at the start position
        screen.on_drag(157.0, 627.0);
        assert_eq!(screen.engine().ball_position(), Vec2::new(130.0, 600.0));
    }

    #[test]
    fn test_obstacles_carry_glyphs() {
        let mut screen = screen();
        // Park the ball where nothing spawns into it before the check
        screen.engine.set_ball_position(Vec2::new(-500.0, -500.0));
        screen.advance(2_000);
        match screen.view() {
            ScreenView::Playing { obstacles, .. } => {
                assert_eq!(obstacles.len(), 1);
                assert!(!obstacles[0].glyph.icon.is_empty());
            }
            other => panic!("expected Playing, got {:?}", other),
        }
    }
}
