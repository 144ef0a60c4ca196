//! Core game logic module for Snake
//!
//! This module contains all the game rules without any terminal or rendering
//! dependencies. The engine talks to its tick clock through
//! [`crate::clock::TickScheduler`], so it can be driven by hand in tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod rng;
pub mod state;
pub mod step;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, GameEvent};
pub use rng::{FoodRng, ScriptedRng};
pub use state::{EndReason, GameState, GameStatus, Position, Snake, Snapshot};
pub use step::StepOutcome;
