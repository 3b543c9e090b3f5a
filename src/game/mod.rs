//! Core simulation for the snake game
//!
//! This module contains all the session logic without any I/O or rendering
//! dependencies: board sizing, movement on a wrapping grid, collisions, apple
//! placement, scoring and speed-up, and input handling.

pub mod apple;
pub mod board;
pub mod config;
pub mod engine;
pub mod progression;
pub mod signal;
pub mod state;

// Re-export commonly used types
pub use board::{Board, Segment};
pub use config::GameConfig;
pub use engine::{GameEngine, InputOutcome, TickOutcome};
pub use signal::{Direction, Signal};
pub use state::{Session, Snake, Snapshot};
