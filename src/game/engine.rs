use std::vec::Drain;

use log::{debug, info};

use super::{
    action::{Command, Direction},
    config::GameConfig,
    rng::FoodRng,
    state::{EndReason, GameState, GameStatus, Snapshot},
    step::{self, StepOutcome},
};
use crate::clock::TickScheduler;

/// Notification emitted by the engine for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// State after a tick or a state-changing command
    Snapshot(Snapshot),
    /// The game ended; carries the final score
    GameOver { score: u32, reason: EndReason },
}

/// The game engine: owns the state, the food RNG and the tick clock
///
/// Every command and tick runs to completion before returning, and the
/// events it produced are queued for [`GameEngine::drain_events`].
pub struct GameEngine<S, R> {
    config: GameConfig,
    state: GameState,
    scheduler: S,
    rng: R,
    events: Vec<GameEvent>,
}

impl<S: TickScheduler, R: FoodRng> GameEngine<S, R> {
    /// Create an idle engine; nothing moves until `start`
    pub fn new(config: GameConfig, scheduler: S, rng: R) -> Self {
        let state = GameState::new(config.board_size);
        Self {
            config,
            state,
            scheduler,
            rng,
            events: Vec::new(),
        }
    }

    /// Reset everything and begin a new game, restarting one in progress
    pub fn start(&mut self) {
        self.scheduler.stop();

        let mut state = GameState::new(self.config.board_size);
        state.food = step::spawn_food(
            &state.snake,
            state.board_size,
            &mut self.rng,
            self.config.max_spawn_attempts,
        );
        state.status = GameStatus::Running;
        self.state = state;

        self.scheduler.start(self.config.tick_interval());
        info!(
            "game started on {}x{} board, tick {}ms",
            self.config.board_size, self.config.board_size, self.config.tick_interval_ms
        );
        self.emit_snapshot();
    }

    /// Latch a direction for the next tick
    ///
    /// A reversal of the direction applied on the last tick is dropped
    /// silently. The check is against `current`, not `pending`, so two quick
    /// presses between ticks cannot fold the snake back onto itself.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.state.current_direction.is_opposite(requested) {
            debug!(
                "rejected {:?}: reverses current {:?}",
                requested, self.state.current_direction
            );
            return false;
        }

        if self.state.pending_direction != requested {
            self.state.pending_direction = requested;
            self.emit_snapshot();
        }
        true
    }

    /// Pause a running game or resume a paused one; no-op otherwise
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.status {
            GameStatus::Running => {
                self.scheduler.stop();
                self.state.status = GameStatus::Paused;
                info!("paused at score {}", self.state.score);
            }
            GameStatus::Paused => {
                self.state.status = GameStatus::Running;
                self.scheduler.start(self.config.tick_interval());
                info!("resumed");
            }
            GameStatus::Idle | GameStatus::Ended => return false,
        }

        self.emit_snapshot();
        true
    }

    /// Dispatch a command from the input layer
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::SetDirection(direction) => {
                self.set_direction(direction);
            }
            Command::TogglePause => {
                self.toggle_pause();
            }
        }
    }

    /// Advance the game by one step
    ///
    /// Ticks that arrive while not running leave the state untouched.
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = step::advance(&mut self.state, &mut self.rng, &self.config);

        match outcome {
            StepOutcome::Skipped => {}
            StepOutcome::Moved | StepOutcome::Ate => self.emit_snapshot(),
            StepOutcome::Ended(reason) => {
                self.scheduler.stop();
                info!(
                    "game over: {} with score {} after {} ticks",
                    reason.as_str(),
                    self.state.score,
                    self.state.ticks
                );
                self.emit_snapshot();
                self.events.push(GameEvent::GameOver {
                    score: self.state.score,
                    reason,
                });
            }
        }

        outcome
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the state wholesale, e.g. to set up a specific layout
    pub fn load_state(&mut self, state: GameState) {
        if state.status == GameStatus::Running {
            self.scheduler.start(self.config.tick_interval());
        } else {
            self.scheduler.stop();
        }
        self.state = state;
        self.emit_snapshot();
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Take the events queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn emit_snapshot(&mut self) {
        self.events.push(GameEvent::Snapshot(self.state.snapshot()));
    }
}
