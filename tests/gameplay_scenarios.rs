//! End-to-end scenarios driven through the engine's command surface

use std::time::Duration;

use grid_snake::clock::{IntervalScheduler, ManualScheduler, TickScheduler};
use grid_snake::game::{
    Direction, EndReason, GameConfig, GameEngine, GameEvent, GameState, GameStatus, Position,
    ScriptedRng, Snake, StepOutcome,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn body(engine: &GameEngine<ManualScheduler, ScriptedRng>) -> Vec<Position> {
    engine.state().snake.segments().copied().collect()
}

#[test]
fn test_fresh_game_first_tick() {
    let mut engine = GameEngine::new(
        GameConfig::default(),
        ManualScheduler::new(),
        ScriptedRng::from_cells(&[(0, 0)]),
    );
    engine.start();
    assert_eq!(body(&engine), vec![Position::new(10, 10)]);

    engine.tick();

    assert_eq!(body(&engine), vec![Position::new(11, 10)]);
    assert_eq!(engine.state().score, 0);
}

#[test]
fn test_eating_grows_and_respawns_food() {
    let mut engine = GameEngine::new(
        GameConfig::default(),
        ManualScheduler::new(),
        // First draw lands on the new head, the second is free
        ScriptedRng::from_cells(&[(12, 10), (4, 17)]),
    );
    engine.load_state(GameState::with_layout(
        Snake::from_segments([Position::new(11, 10), Position::new(10, 10)]),
        Position::new(12, 10),
        Direction::Right,
        20,
    ));

    assert_eq!(engine.tick(), StepOutcome::Ate);

    assert_eq!(
        body(&engine),
        vec![
            Position::new(12, 10),
            Position::new(11, 10),
            Position::new(10, 10)
        ]
    );
    assert_eq!(engine.state().score, 10);
    assert_eq!(engine.state().food, Some(Position::new(4, 17)));
}

#[test]
fn test_left_wall_ends_game() {
    let mut engine = GameEngine::new(
        GameConfig::default(),
        ManualScheduler::new(),
        ScriptedRng::new(vec![0]),
    );
    engine.load_state(GameState::with_layout(
        Snake::new(Position::new(0, 5)),
        Position::new(10, 10),
        Direction::Left,
        20,
    ));
    assert!(engine.scheduler().is_running());

    engine.tick();

    assert_eq!(engine.status(), GameStatus::Ended);
    assert!(!engine.scheduler().is_running());
    let game_over = engine
        .drain_events()
        .find(|event| matches!(event, GameEvent::GameOver { .. }));
    assert_eq!(
        game_over,
        Some(GameEvent::GameOver {
            score: 0,
            reason: EndReason::Wall
        })
    );
}

#[test]
fn test_pause_holds_state_until_resumed() {
    let mut engine = GameEngine::new(
        GameConfig::default(),
        ManualScheduler::new(),
        ScriptedRng::from_cells(&[(0, 0)]),
    );
    engine.start();
    engine.tick();
    engine.toggle_pause();
    assert_eq!(engine.status(), GameStatus::Paused);

    let frozen = engine.state().clone();
    for _ in 0..5 {
        assert_eq!(engine.tick(), StepOutcome::Skipped);
    }
    assert_eq!(engine.state(), &frozen);

    engine.toggle_pause();
    engine.tick();
    assert_eq!(body(&engine), vec![Position::new(12, 10)]);
}

#[test]
fn test_turn_then_reverse_within_one_tick() {
    let mut engine = GameEngine::new(
        GameConfig::default(),
        ManualScheduler::new(),
        ScriptedRng::from_cells(&[(0, 0)]),
    );
    engine.start();
    engine.load_state(GameState::with_layout(
        Snake::from_segments([
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ]),
        Position::new(0, 0),
        Direction::Right,
        20,
    ));

    engine.set_direction(Direction::Down);
    engine.set_direction(Direction::Left);
    engine.tick();

    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.state().snake.head(), Position::new(10, 11));
}

#[tokio::test(start_paused = true)]
async fn test_interval_clock_drives_ticks_at_fixed_rate() {
    let config = GameConfig::default();
    let mut engine = GameEngine::new(
        config,
        IntervalScheduler::new(),
        StdRng::seed_from_u64(3),
    );
    engine.start();
    let begin = tokio::time::Instant::now();

    for _ in 0..4 {
        engine.scheduler_mut().tick().await;
        engine.tick();
    }

    assert_eq!(begin.elapsed(), Duration::from_millis(600));
    assert_eq!(engine.state().snake.head(), Position::new(14, 10));

    engine.toggle_pause();
    let stalled = tokio::time::timeout(
        Duration::from_secs(2),
        engine.scheduler_mut().tick(),
    )
    .await;
    assert!(stalled.is_err());
}
