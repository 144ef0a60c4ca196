use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
///
/// Never empty: every constructor places at least one segment and movement
/// always pushes the new head before dropping the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Create a snake from head-first segments
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Iterate segments head first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, dropping the tail unless the snake grows
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No game has been started yet
    Idle,
    Running,
    Paused,
    /// The last game finished; only `start` leaves this state
    Ended,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// The snake covers every cell and no food can be placed
    BoardFilled,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfCollision => "ran into itself",
            Self::BoardFilled => "filled the board",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only while idle or after the board filled up
    pub food: Option<Position>,
    /// Heading applied on the last tick
    pub current_direction: Direction,
    /// Heading latched from input, applied on the next tick
    pub pending_direction: Direction,
    pub board_size: usize,
    pub score: u32,
    pub ticks: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Idle state: one segment at the centre of the board, no food yet
    pub fn new(board_size: usize) -> Self {
        let center = (board_size / 2) as i32;
        Self {
            snake: Snake::new(Position::new(center, center)),
            food: None,
            current_direction: Direction::Right,
            pending_direction: Direction::Right,
            board_size,
            score: 0,
            ticks: 0,
            status: GameStatus::Idle,
        }
    }

    /// A running state with an explicit layout
    pub fn with_layout(
        snake: Snake,
        food: Position,
        direction: Direction,
        board_size: usize,
    ) -> Self {
        Self {
            snake,
            food: Some(food),
            current_direction: direction,
            pending_direction: direction,
            board_size,
            score: 0,
            ticks: 0,
            status: GameStatus::Running,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.board_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Read-only copy handed to renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
            board_size: self.board_size,
        }
    }
}

/// What a renderer sees after every tick and every state-changing command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Segments, head first
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub status: GameStatus,
    pub board_size: usize,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
