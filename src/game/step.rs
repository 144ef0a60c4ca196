//! The rules of a single tick, free of timers and I/O
//!
//! [`advance`] takes the state and a random source and applies one step:
//! latch the pending direction, move, resolve collisions, eat and grow.
//! Given the same state and the same random values it always produces the
//! same result.

use log::{debug, warn};

use super::{
    config::GameConfig,
    rng::FoodRng,
    state::{EndReason, GameState, GameStatus, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game was not running; nothing changed
    Skipped,
    /// The snake moved one cell
    Moved,
    /// The snake ate the food and grew by one segment
    Ate,
    /// The game ended on this tick
    Ended(EndReason),
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Ended(_))
    }
}

/// Execute one tick of the game
pub fn advance<R: FoodRng>(state: &mut GameState, rng: &mut R, config: &GameConfig) -> StepOutcome {
    if state.status != GameStatus::Running {
        return StepOutcome::Skipped;
    }

    state.current_direction = state.pending_direction;
    state.ticks += 1;

    let new_head = state.snake.head().moved_in_direction(state.current_direction);

    if let Some(reason) = check_collision(state, new_head) {
        state.status = GameStatus::Ended;
        return StepOutcome::Ended(reason);
    }

    let ate_food = state.food == Some(new_head);
    state.snake.advance_to(new_head, ate_food);

    if !ate_food {
        return StepOutcome::Moved;
    }

    state.score += config.food_score;
    debug!("food eaten at ({}, {}), score {}", new_head.x, new_head.y, state.score);

    match spawn_food(&state.snake, state.board_size, rng, config.max_spawn_attempts) {
        Some(food) => {
            state.food = Some(food);
            StepOutcome::Ate
        }
        None => {
            state.food = None;
            state.status = GameStatus::Ended;
            StepOutcome::Ended(EndReason::BoardFilled)
        }
    }
}

/// Check if the new head position causes a collision
///
/// The whole body counts, tail included: the tail has not moved yet when
/// the head arrives.
fn check_collision(state: &GameState, pos: Position) -> Option<EndReason> {
    if !state.is_in_bounds(pos) {
        return Some(EndReason::Wall);
    }

    if state.is_occupied_by_snake(pos) {
        return Some(EndReason::SelfCollision);
    }

    None
}

/// Pick a random free cell for the food
///
/// Tries `max_attempts` uniform placements first, then falls back to a scan
/// of every cell. Returns `None` when the snake covers the whole board.
pub fn spawn_food<R: FoodRng>(
    snake: &Snake,
    board_size: usize,
    rng: &mut R,
    max_attempts: u32,
) -> Option<Position> {
    if board_size == 0 || snake.len() >= board_size * board_size {
        return None;
    }

    for _ in 0..max_attempts {
        let x = rng.next_below(board_size) as i32;
        let y = rng.next_below(board_size) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    warn!(
        "food placement missed {} times, scanning {}x{} board",
        max_attempts, board_size, board_size
    );

    let size = board_size as i32;
    let free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.occupies(*pos))
        .collect();

    if free.is_empty() {
        return None;
    }

    Some(free[rng.next_below(free.len())])
}
