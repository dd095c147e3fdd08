//! Presentation-side logic
//!
//! Nothing here draws pixels. These types turn touch input into ball
//! positions and engine state into a view model a renderer can consume.

pub mod ball_controller;
pub mod obstacle_glyph;
pub mod screen;

pub use ball_controller::BallController;
pub use obstacle_glyph::{Glyph, glyph_for, glyph_for_kind};
pub use screen::{GameScreen, Hud, ObstacleView, ScreenView, Viewport};
