//! Task steps
//!
//! One function per periodic task. Each advances the state by exactly one
//! step and reports what happened. None of them touch persistence or timers;
//! the engine reacts to the returned events.

use glam::Vec2;
use rand::Rng;

use super::collision::first_collision;
use super::state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Spawn one obstacle above the visible area
pub fn spawn_obstacle<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    tuning: &Tuning,
) -> Option<GameEvent> {
    if state.phase == GamePhase::GameOver {
        return None;
    }

    let span = (tuning.screen_width - tuning.obstacle_size).max(0.0);
    let left = rng.random::<f32>() * span;
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let speed = rng.random::<f32>() * (tuning.speed_base + state.level() as f32) + tuning.speed_base;

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(left, tuning.spawn_top),
        kind,
        speed,
        spawned_at_ms: state.time_ms,
    });
    state.obstacles_spawned += 1;

    log::debug!(
        "Spawned {} #{} at x={:.1} speed={:.2}",
        kind.as_str(),
        id,
        left,
        speed
    );
    Some(GameEvent::Spawned { id, kind })
}

/// Move every obstacle down by its speed; obstacles reaching the ground are
/// removed and score one point each
pub fn move_obstacles(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    let ground = tuning.ground_position;
    let mut landed = 0u32;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.y += obstacle.speed;
        if obstacle.pos.y >= ground {
            events.push(GameEvent::Landed { id: obstacle.id });
            landed += 1;
            false
        } else {
            true
        }
    });

    if landed > 0 {
        if let Some(level) = state.add_score(landed, tuning) {
            log::info!("Level up! Now level {} (score {})", level, state.score());
            events.push(GameEvent::LevelUp { level });
        }
    }

    events
}

/// Test the ball against every obstacle; the first hit ends the session
pub fn check_collisions(state: &mut GameState, tuning: &Tuning) -> Option<GameEvent> {
    if state.phase == GamePhase::GameOver {
        return None;
    }

    let hit = first_collision(
        state.ball,
        tuning.ball_size,
        &state.obstacles,
        tuning.obstacle_size,
    )?;
    let id = hit.id;

    log::info!("Collision with #{}! Game over at score {}", id, state.score());
    state.phase = GamePhase::GameOver;
    Some(GameEvent::Collision { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn obstacle(state: &mut GameState, x: f32, y: f32, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, y),
            kind: ObstacleKind::Barrel,
            speed,
            spawned_at_ms: 0,
        });
        id
    }

    #[test]
    fn test_spawn_within_bounds() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        let mut rng = Pcg32::seed_from_u64(12345);

        for _ in 0..200 {
            spawn_obstacle(&mut state, &mut rng, &tuning).unwrap();
        }

        assert_eq!(state.obstacles.len(), 200);
        assert_eq!(state.obstacles_spawned, 200);
        for o in &state.obstacles {
            assert!(o.left() >= 0.0 && o.left() <= tuning.screen_width - tuning.obstacle_size);
            assert_eq!(o.top(), -50.0);
            // level 1: speed in [5, 11)
            assert!(o.speed >= 5.0 && o.speed < 11.0);
        }
        let ids: HashSet<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_spawn_starts_at_tuned_top() {
        let tuning = Tuning {
            spawn_top: -80.0,
            ..Default::default()
        };
        let mut state = GameState::new(&tuning, 0);
        let mut rng = Pcg32::seed_from_u64(3);
        spawn_obstacle(&mut state, &mut rng, &tuning);
        assert_eq!(state.obstacles[0].top(), -80.0);
    }

    #[test]
    fn test_spawn_uses_every_kind() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..400 {
            spawn_obstacle(&mut state, &mut rng, &tuning);
        }
        for kind in ObstacleKind::ALL {
            assert!(state.obstacles.iter().any(|o| o.kind == kind), "{:?} never spawned", kind);
        }
    }

    #[test]
    fn test_spawn_speed_scales_with_level() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        state.set_score(80, &tuning);
        assert_eq!(state.level(), 5);
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            spawn_obstacle(&mut state, &mut rng, &tuning);
        }
        assert!(state.obstacles.iter().all(|o| o.speed >= 5.0 && o.speed < 15.0));
        assert!(state.obstacles.iter().any(|o| o.speed > 11.0));
    }

    #[test]
    fn test_spawn_determinism() {
        let tuning = Tuning::default();
        let mut a = GameState::new(&tuning, 0);
        let mut b = GameState::new(&tuning, 0);
        let mut rng_a = Pcg32::seed_from_u64(99999);
        let mut rng_b = Pcg32::seed_from_u64(99999);
        for _ in 0..10 {
            spawn_obstacle(&mut a, &mut rng_a, &tuning);
            spawn_obstacle(&mut b, &mut rng_b, &tuning);
        }
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_move_lands_and_scores_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        let falling = obstacle(&mut state, 0.0, 100.0, 10.0);
        let landing = obstacle(&mut state, 60.0, 595.0, 5.0);

        let events = move_obstacles(&mut state, &tuning);

        assert_eq!(events, vec![GameEvent::Landed { id: landing }]);
        assert_eq!(state.score(), 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, falling);
        assert_eq!(state.obstacles[0].top(), 110.0);
    }

    #[test]
    fn test_move_just_short_of_ground_survives() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        obstacle(&mut state, 0.0, 590.0, 9.5);
        assert!(move_obstacles(&mut state, &tuning).is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.obstacles[0].top(), 599.5);
    }

    #[test]
    fn test_score_19_to_20_levels_up() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        state.set_score(19, &tuning);
        let id = obstacle(&mut state, 0.0, 599.0, 5.0);

        let events = move_obstacles(&mut state, &tuning);

        assert_eq!(events, vec![GameEvent::Landed { id }, GameEvent::LevelUp { level: 2 }]);
        assert_eq!(state.score(), 20);
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_nothing_moves_after_game_over() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        obstacle(&mut state, 0.0, 599.0, 5.0);
        state.phase = GamePhase::GameOver;

        assert!(move_obstacles(&mut state, &tuning).is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.obstacles[0].top(), 599.0);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(spawn_obstacle(&mut state, &mut rng, &tuning).is_none());
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_collision_ends_session() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        state.ball = Vec2::new(100.0, 100.0);
        let id = obstacle(&mut state, 100.0, 100.0, 5.0);
        obstacle(&mut state, 110.0, 110.0, 5.0);

        assert_eq!(check_collisions(&mut state, &tuning), Some(GameEvent::Collision { id }));
        assert_eq!(state.phase, GamePhase::GameOver);
        // Already over: further checks are no-ops
        assert_eq!(check_collisions(&mut state, &tuning), None);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_collision_keeps_playing() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 0);
        obstacle(&mut state, 0.0, 0.0, 5.0);
        assert_eq!(check_collisions(&mut state, &tuning), None);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    proptest! {
        #[test]
        fn move_advances_or_removes(
            tops in proptest::collection::vec((-50.0f32..650.0, 5.0f32..20.0), 0..30),
        ) {
            let tuning = Tuning::default();
            let mut state = GameState::new(&tuning, 0);
            for &(top, speed) in &tops {
                obstacle(&mut state, 0.0, top, speed);
            }
            let before = state.obstacles.clone();
            let score_before = state.score();

            move_obstacles(&mut state, &tuning);

            let mut removed = 0u32;
            for old in &before {
                let expected = old.top() + old.speed;
                match state.obstacles.iter().find(|o| o.id == old.id) {
                    Some(new) => {
                        prop_assert_eq!(new.top(), expected);
                        prop_assert!(expected < tuning.ground_position);
                    }
                    None => {
                        prop_assert!(expected >= tuning.ground_position);
                        removed += 1;
                    }
                }
            }
            prop_assert_eq!(state.score(), score_before + removed);
            prop_assert_eq!(state.level(), tuning.level_for_score(state.score()));
        }
    }
}
