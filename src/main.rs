//! Dodge Ball entry point
//!
//! Native builds run a headless session: the ball sweeps back and forth
//! along the bottom of the screen until it is hit, then the result is
//! logged and the best score stored next to the working directory.
//!
//! Usage: `dodge-ball [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dodge_ball::engine::GameEngine;
    use dodge_ball::persistence::FileStore;
    use dodge_ball::sim::GameEvent;
    use dodge_ball::tuning::Tuning;
    use dodge_ball::ui::{GameScreen, ScreenView, Viewport};

    /// Frame step for the headless loop
    const FRAME_MS: u64 = 16;
    /// Give up after ten simulated minutes
    const MAX_SESSION_MS: u64 = 10 * 60 * 1000;
    const SAVE_PATH: &str = "dodge_ball_save.json";

    env_logger::init();
    log::info!("Dodge Ball (headless) starting...");

    let mut tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };
    if tuning.seed.is_none() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        tuning.seed = Some(seed);
    }

    let viewport = Viewport::new(tuning.screen_width, tuning.screen_height);
    let engine = GameEngine::new(tuning, FileStore::new(SAVE_PATH));
    let mut screen = GameScreen::new(engine, viewport);

    let mut elapsed = 0u64;
    while elapsed < MAX_SESSION_MS {
        // Sweep the finger across the screen, one pass every four seconds
        let phase = (elapsed as f32 / 4000.0) * std::f32::consts::TAU;
        let x = viewport.width * 0.5 + phase.sin() * viewport.width * 0.45;
        screen.on_drag(x, viewport.height - 20.0);

        for event in screen.advance(FRAME_MS) {
            match event {
                GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                GameEvent::NewBestScore { score } => log::info!("New best score: {}", score),
                GameEvent::Collision { id } => log::info!("Hit by obstacle #{}", id),
                _ => {}
            }
        }
        elapsed += FRAME_MS;

        if let ScreenView::GameOver { score, best_score } = screen.view() {
            println!("Game over after {:.1}s", elapsed as f32 / 1000.0);
            println!("Score: {}  Best: {}", score, best_score);
            return;
        }
    }

    let snapshot = screen.engine().snapshot();
    println!("Survived {:.1}s without a hit", elapsed as f32 / 1000.0);
    println!(
        "Score: {}  Best: {}  Level: {}",
        snapshot.score, snapshot.best_score, snapshot.level
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds embed the library; there is no standalone entry point
}
