//! Grid Snake - a tick-driven snake game
//!
//! This library provides:
//! - Core game rules and the engine state machine (game module)
//! - Tick clocks the engine drives (clock module)
//! - Keyboard mapping, TUI rendering and session metrics
//! - The interactive play loop (modes module)

pub mod clock;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
