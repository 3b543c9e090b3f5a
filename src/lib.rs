//! Grid Snake - a snake game on a wrapping grid
//!
//! This library provides:
//! - Core session logic (game module)
//! - High score persistence (storage module)
//! - The tick loop that drives a session (scheduler module)
//! - A terminal front end (input, render and modes modules)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod storage;
